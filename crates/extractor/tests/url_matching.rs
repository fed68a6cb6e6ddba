use cwfetch_extractor::{CwtvExtractor, Extractor, ExtractorConfig};

const GUID: &str = "d848488f-f62a-40fd-af1f-6440b1821aab";

#[test]
fn matches_every_host_and_query_key() {
    for host in ["cwtv.com", "www.cwtv.com", "cwtvpr.com", "cwseed.com", "www.cwseed.com"] {
        for key in ["play", "watch"] {
            for scheme in ["http", "https"] {
                let url = format!("{scheme}://{host}/shows/all-american-homecoming/ready-or-not/?{key}={GUID}");
                let id = CwtvExtractor::match_id(&url);
                assert_eq!(id.as_ref().map(|i| i.as_str()), Some(GUID), "should match {url}");
            }
        }
    }
}

#[test]
fn matches_known_page_shapes() {
    for (url, expected) in [
        (
            "https://www.cwtv.com/shows/all-american-homecoming/ready-or-not/?play=d848488f-f62a-40fd-af1f-6440b1821aab",
            "d848488f-f62a-40fd-af1f-6440b1821aab",
        ),
        (
            "http://www.cwseed.com/shows/whose-line-is-it-anyway/jeff-davis-4/?play=24282b12-ead2-42f2-95ad-26770c2c6088",
            "24282b12-ead2-42f2-95ad-26770c2c6088",
        ),
        (
            "http://cwtv.com/thecw/chroniclesofcisco/?play=8adebe35-f447-465f-ab52-e863506ff6d6",
            "8adebe35-f447-465f-ab52-e863506ff6d6",
        ),
        (
            "http://cwtvpr.com/the-cw/video?watch=9eee3f60-ef4e-440b-b3b2-49428ac9c54e",
            "9eee3f60-ef4e-440b-b3b2-49428ac9c54e",
        ),
        (
            "http://cwtv.com/shows/arrow/legends-of-yesterday/?utm=x&watch=6b15e985-9345-4f60-baf8-56e96be57c63",
            "6b15e985-9345-4f60-baf8-56e96be57c63",
        ),
    ] {
        let id = CwtvExtractor::match_id(url).unwrap_or_else(|| panic!("should match {url}"));
        assert_eq!(id.as_str(), expected);
    }
}

#[test]
fn uppercase_hex_is_accepted() {
    let url = "https://www.cwtv.com/shows/arrow/pilot/?play=D848488F-F62A-40FD-AF1F-6440B1821AAB";
    let id = CwtvExtractor::match_id(url).unwrap();
    assert_eq!(id.as_str(), "D848488F-F62A-40FD-AF1F-6440B1821AAB");
}

#[test]
fn rejects_unsupported_urls() {
    let extractor = CwtvExtractor::new(ExtractorConfig::default());
    for url in [
        "https://www.cwtv.com/?play=d848488f-f62a-40fd-af1f-6440b1821aab",
        "https://www.cwtv.com/shows/arrow/",
        "https://www.cwtv.com/shows/arrow/pilot/?play=not-a-guid",
        "https://www.cwtv.com/shows/arrow/pilot/?display=d848488f-f62a-40fd-af1f-6440b1821aab",
        "https://www.cwnetwork.com/shows/arrow/pilot/?play=d848488f-f62a-40fd-af1f-6440b1821aab",
        "ftp://www.cwtv.com/shows/arrow/pilot/?play=d848488f-f62a-40fd-af1f-6440b1821aab",
    ] {
        assert!(!extractor.suitable(url), "should NOT match {url}");
        assert!(CwtvExtractor::match_id(url).is_none());
    }
}
