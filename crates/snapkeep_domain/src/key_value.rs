use std::collections::HashMap;

use crate::Error;

/// Parses `KEY=VALUE` strings into a map. Each item must contain exactly
/// one `=`; anything else is rejected so malformed filters and tags fail
/// before they reach the provider.
pub fn parse_key_values<I, S>(items: I) -> Result<HashMap<String, String>, Error>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut parsed = HashMap::new();
    for item in items {
        let item = item.as_ref();
        let mut parts = item.split('=');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(key), Some(value), None) => {
                parsed.insert(key.to_string(), value.to_string());
            }
            _ => return Err(Error::InvalidKeyValue(item.to_string())),
        }
    }
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_parse_valid_items() {
        let fixture = ["Name=testCase", "Backup=Testing", "Group=WereTesting"];

        let actual = parse_key_values(fixture).unwrap();

        let expected = HashMap::from([
            ("Name".to_string(), "testCase".to_string()),
            ("Backup".to_string(), "Testing".to_string()),
            ("Group".to_string(), "WereTesting".to_string()),
        ]);
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_parse_empty_value_is_allowed() {
        let actual = parse_key_values(["Name="]).unwrap();
        let expected = HashMap::from([("Name".to_string(), String::new())]);
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_parse_item_with_two_separators() {
        let actual = parse_key_values(["Broken=Testcase=Blah"]).unwrap_err();
        assert_eq!(actual, Error::InvalidKeyValue("Broken=Testcase=Blah".to_string()));
    }

    #[test]
    fn test_parse_item_without_separator() {
        let actual = parse_key_values(["Broken"]).unwrap_err();
        assert_eq!(actual, Error::InvalidKeyValue("Broken".to_string()));
    }

    #[test]
    fn test_parse_no_items() {
        let actual = parse_key_values(Vec::<String>::new()).unwrap();
        assert_eq!(actual, HashMap::new());
    }
}
