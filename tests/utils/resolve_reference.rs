//  ██████╗  █████╗ ███████╗███████╗██╗███╗   ██╗ ██████╗
//  ██╔══██╗██╔══██╗██╔════╝██╔════╝██║████╗  ██║██╔════╝
//  ██████╔╝███████║███████╗███████╗██║██╔██╗ ██║██║  ███╗
//  ██╔═══╝ ██╔══██║╚════██║╚════██║██║██║╚██╗██║██║   ██║
//  ██║     ██║  ██║███████║███████║██║██║ ╚████║╚██████╔╝
//  ╚═╝     ╚═╝  ╚═╝╚══════╝╚══════╝╚═╝╚═╝  ╚═══╝ ╚═════╝

#[cfg(test)]
mod passing {
    use relocate::utils::url::{is_remote_url, resolve_reference};

    #[test]
    fn relative_base() {
        assert_eq!(resolve_reference("sub/", "img/a.png"), "sub/img/a.png");
        assert_eq!(resolve_reference("a/b/", "../c/"), "a/c/");
        assert_eq!(resolve_reference("../src/", "sub/"), "../src/sub/");
    }

    #[test]
    fn anchored_base() {
        assert_eq!(resolve_reference("/site/src/", "sub/"), "/site/src/sub/");
        assert_eq!(resolve_reference("/site/src/page.html", "a.png"), "/site/src/a.png");
    }

    #[test]
    fn remote_base() {
        assert_eq!(
            resolve_reference("https://cdn.example.com/lib/", "x/a.js"),
            "https://cdn.example.com/lib/x/a.js"
        );
        assert!(is_remote_url(&resolve_reference(
            "https://cdn.example.com/lib/",
            "../a.js"
        )));
    }
}

//  ███████╗ █████╗ ██╗██╗     ██╗███╗   ██╗ ██████╗
//  ██╔════╝██╔══██╗██║██║     ██║████╗  ██║██╔════╝
//  █████╗  ███████║██║██║     ██║██╔██╗ ██║██║  ███╗
//  ██╔══╝  ██╔══██║██║██║     ██║██║╚██╗██║██║   ██║
//  ██║     ██║  ██║██║███████╗██║██║ ╚████║╚██████╔╝
//  ╚═╝     ╚═╝  ╚═╝╚═╝╚══════╝╚═╝╚═╝  ╚═══╝ ╚═════╝

#[cfg(test)]
mod failing {
    use relocate::utils::url::resolve_reference;

    #[test]
    fn reference_is_remote() {
        assert_eq!(
            resolve_reference("sub/", "https://example.com/a.png"),
            "https://example.com/a.png"
        );
    }

    #[test]
    fn climbs_past_root() {
        assert_eq!(resolve_reference("/a/", "../../b.png"), "/b.png");
    }
}
