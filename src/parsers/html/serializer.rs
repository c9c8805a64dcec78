use encoding_rs::Encoding;
use html5ever::serialize::{serialize, SerializeOpts};
use kuchikiki::NodeRef;

use crate::core::RelocateError;

/// 序列化文档
///
/// `document_encoding` 非空且可识别时，输出会被转换成该编码。
pub fn serialize_document(dom: NodeRef, document_encoding: &str) -> Result<Vec<u8>, RelocateError> {
    let mut buf: Vec<u8> = Vec::new();

    serialize(&mut buf, &dom, SerializeOpts::default())
        .map_err(RelocateError::Serialize)?;

    if !document_encoding.is_empty() {
        if let Some(encoding) = Encoding::for_label(document_encoding.as_bytes()) {
            let s: &str = &String::from_utf8_lossy(&buf);
            let (data, _, _) = encoding.encode(s);
            buf = data.to_vec();
        }
    }

    Ok(buf)
}
