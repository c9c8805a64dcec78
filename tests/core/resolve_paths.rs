//  ██████╗  █████╗ ███████╗███████╗██╗███╗   ██╗ ██████╗
//  ██╔══██╗██╔══██╗██╔════╝██╔════╝██║████╗  ██║██╔════╝
//  ██████╔╝███████║███████╗███████╗██║██╔██╗ ██║██║  ███╗
//  ██╔═══╝ ██╔══██║╚════██║╚════██║██║██║╚██╗██║██║   ██║
//  ██║     ██║  ██║███████║███████║██║██║ ╚████║╚██████╔╝
//  ╚═╝     ╚═╝  ╚═╝╚══════╝╚══════╝╚═╝╚═╝  ╚═══╝ ╚═════╝

#[cfg(test)]
mod passing {
    use kuchikiki::NodeRef;
    use relocate::core::{resolve_paths, resolve_paths_with};
    use relocate::{
        html_to_dom, serialize_document, CompiledSelector, Document, Element, RewriteConfig,
    };

    const INPUT: &str = "/site/src/page.html";
    const OUTPUT: &str = "/site/dist/page.html";

    fn select_attr(dom: &NodeRef, selector: &str, attr: &str) -> Vec<Option<String>> {
        let selector = CompiledSelector::compile(selector).unwrap();
        dom.select_elements(&selector)
            .iter()
            .map(|element| element.attr(attr))
            .collect()
    }

    fn select_text(dom: &NodeRef, selector: &str) -> Vec<String> {
        let selector = CompiledSelector::compile(selector).unwrap();
        dom.select_elements(&selector)
            .iter()
            .map(|element| element.text())
            .collect()
    }

    #[test]
    fn url_attributes() {
        let html = r##"<html><head><link rel="import" href="x-a.html"></head>
<body><a href="docs/index.html">docs</a><form action="submit.php"></form>
<img src="img/a.png"><img src="https://example.com/b.png"><a href="#top">top</a></body></html>"##;
        let dom = html_to_dom(html.as_bytes(), "utf-8");

        resolve_paths(&dom, INPUT, OUTPUT, None);

        assert_eq!(
            select_attr(&dom, "link", "href"),
            vec![Some("../src/x-a.html".to_string())]
        );
        assert_eq!(
            select_attr(&dom, "a", "href"),
            vec![
                Some("../src/docs/index.html".to_string()),
                Some("#top".to_string())
            ]
        );
        assert_eq!(
            select_attr(&dom, "form", "action"),
            vec![Some("../src/submit.php".to_string())]
        );
        assert_eq!(
            select_attr(&dom, "img", "src"),
            vec![
                Some("../src/img/a.png".to_string()),
                Some("https://example.com/b.png".to_string())
            ]
        );
    }

    #[test]
    fn template_expressions_untouched() {
        let html = r#"<html><body><img src="{{item.icon}}"><a href="pages/{{id}}.html">x</a></body></html>"#;
        let dom = html_to_dom(html.as_bytes(), "utf-8");

        resolve_paths(&dom, INPUT, OUTPUT, None);

        assert_eq!(
            select_attr(&dom, "img", "src"),
            vec![Some("{{item.icon}}".to_string())]
        );
        assert_eq!(
            select_attr(&dom, "a", "href"),
            vec![Some("pages/{{id}}.html".to_string())]
        );
    }

    #[test]
    fn empty_attributes_skipped() {
        let html = r#"<html><body><a href="">x</a></body></html>"#;
        let dom = html_to_dom(html.as_bytes(), "utf-8");

        resolve_paths(&dom, INPUT, OUTPUT, None);

        assert_eq!(select_attr(&dom, "a", "href"), vec![Some(String::new())]);
    }

    #[test]
    fn style_attribute() {
        let html = r#"<html><body><div style="background: url('img/bg.png')"></div></body></html>"#;
        let dom = html_to_dom(html.as_bytes(), "utf-8");

        resolve_paths(&dom, INPUT, OUTPUT, None);

        assert_eq!(
            select_attr(&dom, "div", "style"),
            vec![Some("background: url(\"../src/img/bg.png\")".to_string())]
        );
    }

    #[test]
    fn inline_styles() {
        let html = r#"<html><head>
<style>.a { background: url(img/a.png); }</style>
<style type="text/css">.b { background: url("img/b.png"); }</style>
<style type="text/less">.c { background: url(img/c.png); }</style>
</head><body></body></html>"#;
        let dom = html_to_dom(html.as_bytes(), "utf-8");

        resolve_paths(&dom, INPUT, OUTPUT, None);

        assert_eq!(
            select_text(&dom, "style"),
            vec![
                ".a { background: url(\"../src/img/a.png\"); }".to_string(),
                ".b { background: url(\"../src/img/b.png\"); }".to_string(),
                ".c { background: url(img/c.png); }".to_string(),
            ]
        );
    }

    #[test]
    fn base_declaration() {
        let html = r#"<html><head><base href="sub"><base href="ignored/">
<style>.a { background: url(img/a.png); }</style></head>
<body><img src="img/b.png"><polymer-element name="x-a"></polymer-element></body></html>"#;
        let dom = html_to_dom(html.as_bytes(), "utf-8");

        resolve_paths(&dom, INPUT, OUTPUT, None);

        assert!(select_attr(&dom, "base", "href").is_empty());
        assert_eq!(
            select_attr(&dom, "img", "src"),
            vec![Some("../src/sub/img/b.png".to_string())]
        );
        assert_eq!(
            select_text(&dom, "style"),
            vec![".a { background: url(\"../src/sub/img/a.png\"); }".to_string()]
        );
        assert_eq!(
            select_attr(&dom, "polymer-element", "assetpath"),
            vec![Some("../src/sub/".to_string())]
        );
    }

    #[test]
    fn protocol_relative_base_declaration() {
        let html = r#"<html><head><base href="//cdn.example.com/lib">
<style>a{background:url(b.png)}</style></head>
<body><img src="a.png"></body></html>"#;
        let dom = html_to_dom(html.as_bytes(), "utf-8");

        resolve_paths(&dom, INPUT, OUTPUT, None);

        assert_eq!(
            select_attr(&dom, "img", "src"),
            vec![Some("//cdn.example.com/lib/a.png".to_string())]
        );
        assert_eq!(
            select_text(&dom, "style"),
            vec!["a{background:url(\"//cdn.example.com/lib/b.png\")}".to_string()]
        );
    }

    #[test]
    fn combinator_selectors() {
        let config = RewriteConfig::builder()
            .url_attribute_rules(vec![("picture > img", vec!["src"])])
            .inline_style_selector("head > style:first-child")
            .build()
            .unwrap();
        let html = r#"<html><head><style>.a{background:url(a.png)}</style><style>.b{background:url(b.png)}</style></head>
<body><picture><img src="x.png"></picture><img src="y.png"></body></html>"#;
        let dom = html_to_dom(html.as_bytes(), "utf-8");

        resolve_paths_with(&config, &dom, INPUT, OUTPUT, None);

        assert_eq!(
            select_attr(&dom, "img", "src"),
            vec![Some("../src/x.png".to_string()), Some("y.png".to_string())]
        );
        assert_eq!(
            select_text(&dom, "style"),
            vec![
                ".a{background:url(\"../src/a.png\")}".to_string(),
                ".b{background:url(b.png)}".to_string(),
            ]
        );
    }

    #[test]
    fn asset_path_tagging() {
        let html = r#"<html><body>
<polymer-element name="x-a"></polymer-element>
<polymer-element name="x-b" assetpath="stale/"></polymer-element>
</body></html>"#;
        let dom = html_to_dom(html.as_bytes(), "utf-8");

        resolve_paths(&dom, INPUT, OUTPUT, None);

        assert_eq!(
            select_attr(&dom, "polymer-element", "assetpath"),
            vec![Some("../src/".to_string()), Some("../src/".to_string())]
        );
    }

    #[test]
    fn asset_path_identical_locations() {
        let html = r#"<html><body><polymer-element name="x-a"></polymer-element></body></html>"#;
        let dom = html_to_dom(html.as_bytes(), "utf-8");

        resolve_paths(&dom, INPUT, INPUT, None);

        assert_eq!(
            select_attr(&dom, "polymer-element", "assetpath"),
            vec![Some(String::new())]
        );
    }

    #[test]
    fn module_dependencies() {
        let html = r#"<html><body>
<script>Flipper.register('x-a', ['./dep', other, 'lib'])</script>
<script type="text/javascript">Flipper.define('x-b', ["./b.js"])</script>
<script type="module">Flipper.define('x-c', ['./c'])</script>
<script src="x.js"></script>
</body></html>"#;
        let dom = html_to_dom(html.as_bytes(), "utf-8");

        resolve_paths(&dom, INPUT, OUTPUT, None);

        assert_eq!(
            select_text(&dom, "script"),
            vec![
                "Flipper.register('x-a', ['../src/dep.js',  other, 'lib'])".to_string(),
                "Flipper.define('x-b', ['../src/b.js'])".to_string(),
                "Flipper.define('x-c', ['./c'])".to_string(),
                String::new(),
            ]
        );
        assert_eq!(
            select_attr(&dom, "script", "src"),
            vec![None, None, None, Some("../src/x.js".to_string())]
        );
    }

    #[test]
    fn template_contents() {
        let html = r#"<html><body><template><img src="img/a.png"></template></body></html>"#;
        let dom = html_to_dom(html.as_bytes(), "utf-8");

        resolve_paths(&dom, INPUT, OUTPUT, None);

        assert_eq!(
            select_attr(&dom, "img", "src"),
            vec![Some("../src/img/a.png".to_string())]
        );
    }

    #[test]
    fn abspath() {
        let html = r#"<html><body><img src="b.png"><polymer-element></polymer-element></body></html>"#;
        let dom = html_to_dom(html.as_bytes(), "utf-8");

        resolve_paths(&dom, "/proj/pages/a.html", "/proj/out/a.html", Some("/proj"));

        assert_eq!(
            select_attr(&dom, "img", "src"),
            vec![Some("/pages/b.png".to_string())]
        );
        assert_eq!(
            select_attr(&dom, "polymer-element", "assetpath"),
            vec![Some("/pages/".to_string())]
        );
    }

    #[test]
    fn custom_table() {
        let config = RewriteConfig::builder()
            .url_attribute_rules(vec![("img", vec!["data-src"])])
            .asset_element_selector("dom-module")
            .asset_path_attribute("data-assetpath")
            .module_namespace("Loader")
            .module_calls(vec!["require"])
            .build()
            .unwrap();
        let html = r#"<html><body>
<img src="a.png" data-src="b.png">
<dom-module id="x"></dom-module>
<script>Loader.require('x', ['./y']); Flipper.define('z', ['./z'])</script>
</body></html>"#;
        let dom = html_to_dom(html.as_bytes(), "utf-8");

        resolve_paths_with(&config, &dom, INPUT, OUTPUT, None);

        assert_eq!(select_attr(&dom, "img", "src"), vec![Some("a.png".to_string())]);
        assert_eq!(
            select_attr(&dom, "img", "data-src"),
            vec![Some("../src/b.png".to_string())]
        );
        assert_eq!(
            select_attr(&dom, "dom-module", "data-assetpath"),
            vec![Some("../src/".to_string())]
        );
        assert_eq!(
            select_text(&dom, "script"),
            vec!["Loader.require('x', ['../src/y.js']); Flipper.define('z', ['./z'])".to_string()]
        );
    }

    #[test]
    fn serializes_without_base() {
        let html = r#"<html><head><base href="sub/"></head><body><img src="a.png"></body></html>"#;
        let dom = html_to_dom(html.as_bytes(), "utf-8");

        resolve_paths(&dom, INPUT, OUTPUT, None);
        let result = String::from_utf8(serialize_document(dom, "utf-8").unwrap()).unwrap();

        assert_eq!(
            result,
            r#"<html><head></head><body><img src="../src/sub/a.png"></body></html>"#
        );
    }
}
