// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Unit tests for Domains API wire types.

#[cfg(test)]
mod tests {
    use crate::domains::types::*;
    use serde_json::json;

    #[test]
    fn test_record_type_known_and_other() {
        assert_eq!(RecordType::from("AAAA"), RecordType::Aaaa);
        assert_eq!(RecordType::from("CNAME").to_string(), "CNAME");

        let other = RecordType::from("HTTPS");
        assert_eq!(other, RecordType::Other("HTTPS".to_string()));
        assert_eq!(String::from(other), "HTTPS");
    }

    #[test]
    fn test_record_type_domain_targets() {
        for rtype in ["CNAME", "ALIAS", "MX", "SRV"] {
            assert!(RecordType::from(rtype).has_domain_targets(), "{rtype}");
        }
        for rtype in ["A", "AAAA", "TXT", "NS", "CAA"] {
            assert!(!RecordType::from(rtype).has_domain_targets(), "{rtype}");
        }
    }

    #[test]
    fn test_record_type_supported_set() {
        assert!(RecordType::A.is_supported());
        assert!(RecordType::Mx.is_supported());
        assert!(!RecordType::Soa.is_supported());
        assert!(!RecordType::Alias.is_supported());
        assert!(!RecordType::from("HTTPS").is_supported());
    }

    #[test]
    fn test_rrset_deserializes_api_response() {
        let rrset: RecordSet = serde_json::from_value(json!({
            "id": "1234",
            "name": "test.com.",
            "type": "A",
            "ttl": 300,
            "records": [{"content": "1.2.3.4", "disabled": false}],
            "comment": "ignored"
        }))
        .unwrap();

        assert_eq!(rrset.id, "1234");
        assert_eq!(rrset.record_type, RecordType::A);
        assert_eq!(rrset.records, vec![RecordItem::new("1.2.3.4")]);
    }

    #[test]
    fn test_new_rrset_serializes_without_id() {
        let rrset = RecordSet {
            id: String::new(),
            name: "test.com.".to_string(),
            record_type: RecordType::Cname,
            ttl: 300,
            records: vec![RecordItem::new("target.test.com.")],
        };

        let value = serde_json::to_value(&rrset).unwrap();
        assert!(value.get("id").is_none());
        assert_eq!(value["type"], "CNAME");
        assert_eq!(value["records"][0]["content"], "target.test.com.");
    }

    #[test]
    fn test_paged_list_missing_next_offset_is_last_page() {
        let page: PagedList<Zone> = serde_json::from_value(json!({
            "count": 1,
            "result": [{"id": "1234", "name": "test.com."}]
        }))
        .unwrap();

        assert_eq!(page.next_offset, 0);
        assert_eq!(page.result.len(), 1);
    }

    #[test]
    fn test_paged_list_constructors() {
        let page = PagedList::new(vec![1, 2, 3], 3);
        assert_eq!(page.count, 3);
        assert_eq!(page.next_offset, 3);

        let last = PagedList::<u8>::last(vec![]);
        assert_eq!(last.next_offset, 0);
        assert_eq!(last.count, 0);
    }
}
