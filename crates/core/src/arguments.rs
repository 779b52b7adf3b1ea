// Validation of incoming tool arguments against the tool's parameter list.
//
// Unknown keys are dropped and every known key must carry a value of its
// declared kind (`null` included), so whatever survives is exactly what gets
// forwarded upstream.

use crate::error::ArgumentError;
use crate::tools::{FoloTool, ParamKind, ParamSpec};
use serde_json::{Map, Value};

/// Arguments accepted for a tool, ready to be forwarded
pub type ToolArguments = Map<String, Value>;

impl FoloTool {
    /// Check `arguments` against this tool's parameters.
    ///
    /// A missing or `null` argument object is the same as `{}`.
    pub fn validate_arguments(
        &self,
        arguments: Option<Value>,
    ) -> Result<ToolArguments, ArgumentError> {
        let mut provided = match arguments {
            None | Some(Value::Null) => return Ok(ToolArguments::new()),
            Some(Value::Object(map)) => map,
            Some(_) => return Err(ArgumentError::NotAnObject { tool: self.name() }),
        };

        let mut accepted = ToolArguments::new();
        for param in self.params() {
            match provided.remove(param.name) {
                None => {}
                Some(value) => {
                    if !matches_kind(&value, param.kind) {
                        return Err(invalid(*self, param));
                    }
                    accepted.insert(param.name.to_string(), value);
                }
            }
        }

        Ok(accepted)
    }
}

fn invalid(tool: FoloTool, param: &ParamSpec) -> ArgumentError {
    ArgumentError::InvalidValue {
        tool: tool.name(),
        field: param.name,
        expected: param.kind.expected(),
    }
}

fn matches_kind(value: &Value, kind: ParamKind) -> bool {
    match kind {
        ParamKind::String => value.is_string(),
        ParamKind::Number => value.is_number(),
        ParamKind::Boolean => value.is_boolean(),
        ParamKind::StringArray => value
            .as_array()
            .is_some_and(|items| items.iter().all(Value::is_string)),
        ParamKind::DateTime => value.as_str().is_some_and(is_utc_timestamp),
        ParamKind::Url => value.as_str().is_some_and(|s| url::Url::parse(s).is_ok()),
    }
}

// RFC 3339 in UTC with a `T` separator and `Z` suffix; offsets are rejected.
fn is_utc_timestamp(s: &str) -> bool {
    s.ends_with('Z') && s.contains('T') && chrono::DateTime::parse_from_rfc3339(s).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_arguments_are_empty() {
        assert!(FoloTool::UnreadCount.validate_arguments(None).unwrap().is_empty());
        assert!(FoloTool::UnreadCount
            .validate_arguments(Some(Value::Null))
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_non_object_rejected() {
        let err = FoloTool::FeedInfo
            .validate_arguments(Some(json!(["id"])))
            .unwrap_err();
        assert_eq!(err, ArgumentError::NotAnObject { tool: "feed_info" });
    }

    #[test]
    fn test_unknown_keys_dropped() {
        let args = FoloTool::UnreadCount
            .validate_arguments(Some(json!({"view": 1, "bogus": true})))
            .unwrap();
        assert_eq!(Value::Object(args), json!({"view": 1}));
    }

    #[test]
    fn test_null_argument_rejected() {
        let err = FoloTool::SubscriptionList
            .validate_arguments(Some(json!({"view": null, "userId": "u1"})))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid argument 'view' for subscription_list: expected a number"
        );
    }

    #[test]
    fn test_wrong_type_rejected() {
        let err = FoloTool::EntryList
            .validate_arguments(Some(json!({"limit": "ten"})))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid argument 'limit' for entry_list: expected a number"
        );
    }

    #[test]
    fn test_string_array() {
        assert!(FoloTool::MarkRead
            .validate_arguments(Some(json!({"feedIdList": ["a", "b"]})))
            .is_ok());
        assert!(FoloTool::MarkRead
            .validate_arguments(Some(json!({"feedIdList": ["a", 2]})))
            .is_err());
        assert!(FoloTool::MarkRead
            .validate_arguments(Some(json!({"feedIdList": "a"})))
            .is_err());
    }

    #[test]
    fn test_datetime_format() {
        assert!(FoloTool::EntryList
            .validate_arguments(Some(json!({"publishedAfter": "2025-01-01T00:00:00Z"})))
            .is_ok());
        assert!(FoloTool::EntryList
            .validate_arguments(Some(json!({"publishedBefore": "2025-01-01T08:30:00.123Z"})))
            .is_ok());
        assert!(FoloTool::EntryList
            .validate_arguments(Some(json!({"publishedAfter": "yesterday"})))
            .is_err());
        assert!(FoloTool::EntryList
            .validate_arguments(Some(json!({"publishedAfter": "2025-01-01T00:00:00+02:00"})))
            .is_err());
        assert!(FoloTool::EntryList
            .validate_arguments(Some(json!({"publishedAfter": "2025-01-01 00:00:00Z"})))
            .is_err());
    }

    #[test]
    fn test_url_format() {
        assert!(FoloTool::FeedInfo
            .validate_arguments(Some(json!({"url": "https://example.com/feed.xml"})))
            .is_ok());
        assert!(FoloTool::FeedInfo
            .validate_arguments(Some(json!({"url": "not a url"})))
            .is_err());
    }

    #[test]
    fn test_preserves_values() {
        let input = json!({
            "view": 0,
            "feedIdList": ["f1", "f2"],
            "read": false,
            "limit": 20,
            "withContent": true
        });
        let args = FoloTool::EntryList.validate_arguments(Some(input.clone())).unwrap();
        assert_eq!(Value::Object(args), input);
    }
}
