//! Third-party identity lookups over `userId`.

use crate::bidder::types::{BidRequest, Id5Id};

/// Criteo id, when the host resolved one.
#[must_use]
pub fn criteo_id(request: &BidRequest) -> Option<&str> {
    request
        .user_id
        .as_ref()
        .and_then(|user_id| user_id.criteo_id.as_deref())
        .filter(|id| !id.is_empty())
}

/// ID5 uid and link type, present only as a pair.
fn valid_id5(request: &BidRequest) -> Option<(&str, &str)> {
    let Id5Id { uid, ext } = request.user_id.as_ref()?.id5id.as_ref()?;
    let uid = uid.as_deref().filter(|uid| !uid.is_empty())?;
    let link_type = ext
        .as_ref()?
        .link_type
        .as_deref()
        .filter(|link_type| !link_type.is_empty())?;
    Some((uid, link_type))
}

#[must_use]
pub fn id5_id(request: &BidRequest) -> Option<&str> {
    valid_id5(request).map(|(uid, _)| uid)
}

#[must_use]
pub fn id5_link_type(request: &BidRequest) -> Option<&str> {
    valid_id5(request).map(|(_, link_type)| link_type)
}

/// Novatiq hyper id; only returned once the snowflake sync has completed.
#[must_use]
pub fn hyper_id(request: &BidRequest) -> Option<&str> {
    let snowflake = request
        .user_id
        .as_ref()?
        .novatiq
        .as_ref()?
        .snowflake
        .as_ref()?;
    let synced = snowflake
        .sync_response
        .as_ref()
        .and_then(serde_json::Value::as_f64)
        == Some(1.0);
    if !synced {
        return None;
    }
    snowflake.id.as_deref()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value as Json};

    fn request_with_user_id(user_id: Json) -> BidRequest {
        serde_json::from_value(json!({
            "bidId": "2f6ac468a9c15e",
            "params": { "id": "58278" },
            "userId": user_id
        }))
        .expect("should deserialize")
    }

    #[test]
    fn test_criteo_id() {
        let request = request_with_user_id(json!({ "criteoId": "criteo-abc" }));
        assert_eq!(criteo_id(&request), Some("criteo-abc"));

        let request = request_with_user_id(json!({ "criteoId": "" }));
        assert_eq!(criteo_id(&request), None);

        assert_eq!(criteo_id(&BidRequest::default()), None);
    }

    #[test]
    fn test_id5_requires_uid_and_link_type() {
        let request = request_with_user_id(json!({
            "id5id": { "uid": "id5-xyz", "ext": { "linkType": 2 } }
        }));
        assert_eq!(id5_id(&request), Some("id5-xyz"));
        assert_eq!(id5_link_type(&request), Some("2"));

        let request = request_with_user_id(json!({
            "id5id": { "uid": "id5-xyz", "ext": {} }
        }));
        assert_eq!(id5_id(&request), None);
        assert_eq!(id5_link_type(&request), None);

        let request = request_with_user_id(json!({
            "id5id": { "ext": { "linkType": 1 } }
        }));
        assert_eq!(id5_id(&request), None);
        assert_eq!(id5_link_type(&request), None);

        let request = request_with_user_id(json!({
            "id5id": { "uid": "id5-xyz" }
        }));
        assert_eq!(id5_id(&request), None);
        assert_eq!(id5_link_type(&request), None);
    }

    #[test]
    fn test_hyper_id_requires_completed_sync() {
        let request = request_with_user_id(json!({
            "novatiq": { "snowflake": { "id": "snowflake-1", "syncResponse": 1 } }
        }));
        assert_eq!(hyper_id(&request), Some("snowflake-1"));

        let request = request_with_user_id(json!({
            "novatiq": { "snowflake": { "id": "snowflake-1", "syncResponse": 2 } }
        }));
        assert_eq!(hyper_id(&request), None);

        let request = request_with_user_id(json!({
            "novatiq": { "snowflake": { "id": "snowflake-1", "syncResponse": "1" } }
        }));
        assert_eq!(hyper_id(&request), None);

        let request = request_with_user_id(json!({
            "novatiq": { "snowflake": { "id": "snowflake-1" } }
        }));
        assert_eq!(hyper_id(&request), None);
    }
}
