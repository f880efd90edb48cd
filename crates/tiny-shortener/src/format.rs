use serde::Serialize;
use serde_json::ser::PrettyFormatter;

/// Encodes `value` as JSON, tab-indented when `pretty` is set.
pub fn to_json<T>(value: &T, pretty: bool) -> serde_json::Result<Vec<u8>>
where
    T: Serialize + ?Sized,
{
    if !pretty {
        return serde_json::to_vec(value);
    }

    let mut out = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(b"\t"));
    value.serialize(&mut serializer)?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::Timestamp;
    use tiny_core::TinyUrl;

    fn entries() -> Vec<TinyUrl> {
        let created = Timestamp::from_second(1_700_000_000).unwrap();
        vec![
            TinyUrl {
                id: "First entry".to_string(),
                url: "foo.bar".to_string(),
                created,
            },
            TinyUrl {
                id: "Second entry".to_string(),
                url: "lorem.ipsum".to_string(),
                created,
            },
        ]
    }

    #[test]
    fn compact_list() {
        let out = to_json(&entries(), false).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            r#"[{"id":"First entry","url":"foo.bar","created":1700000000},{"id":"Second entry","url":"lorem.ipsum","created":1700000000}]"#
        );
    }

    #[test]
    fn pretty_list_uses_tabs() {
        let out = to_json(&entries(), true).unwrap();
        let expected = "[\n\t{\n\t\t\"id\": \"First entry\",\n\t\t\"url\": \"foo.bar\",\n\t\t\"created\": 1700000000\n\t},\n\t{\n\t\t\"id\": \"Second entry\",\n\t\t\"url\": \"lorem.ipsum\",\n\t\t\"created\": 1700000000\n\t}\n]";
        assert_eq!(String::from_utf8(out).unwrap(), expected);
    }

    #[test]
    fn empty_list() {
        let empty: Vec<TinyUrl> = Vec::new();
        assert_eq!(to_json(&empty, false).unwrap(), b"[]");
        assert_eq!(to_json(&empty, true).unwrap(), b"[]");
    }
}
