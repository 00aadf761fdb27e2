// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Unit tests for `normalize.rs`

#[cfg(test)]
mod tests {
    use crate::domains::{RecordItem, RecordSet, RecordType};
    use crate::endpoint::Endpoint;
    use crate::provider::normalize::{ensure_trailing_dot, normalize, to_endpoints, to_wire_rrset};

    fn rrset(name: &str, record_type: RecordType, ttl: u32, contents: &[&str]) -> RecordSet {
        RecordSet {
            id: "rr-1".to_string(),
            name: name.to_string(),
            record_type,
            ttl,
            records: contents.iter().map(|c| RecordItem::new(*c)).collect(),
        }
    }

    #[test]
    fn test_ensure_trailing_dot() {
        assert_eq!(ensure_trailing_dot("test.com"), "test.com.");
        assert_eq!(ensure_trailing_dot("test.com."), "test.com.");
        assert_eq!(ensure_trailing_dot("1.2.3.4"), "1.2.3.4");
        assert_eq!(ensure_trailing_dot("2001:db8::1"), "2001:db8::1");
    }

    #[test]
    fn test_zero_ttl_defaults_to_300() {
        let endpoint = normalize(Endpoint::new("www.test.com", "A", 0, ["1.2.3.4"]));
        assert_eq!(endpoint.record_ttl, 300);
    }

    #[test]
    fn test_explicit_ttl_is_kept() {
        let endpoint = normalize(Endpoint::new("www.test.com", "A", 400, ["1.2.3.4"]));
        assert_eq!(endpoint.record_ttl, 400);
    }

    #[test]
    fn test_name_gets_trailing_dot() {
        let endpoint = normalize(Endpoint::new("www.test.com", "A", 0, ["1.2.3.4"]));
        assert_eq!(endpoint.dns_name, "www.test.com.");
    }

    #[test]
    fn test_domain_targets_get_trailing_dot() {
        for record_type in ["CNAME", "ALIAS", "MX", "SRV"] {
            let endpoint = normalize(Endpoint::new(
                "www.test.com",
                record_type,
                0,
                ["target.test.com"],
            ));
            assert_eq!(
                endpoint.targets,
                vec!["target.test.com."],
                "{record_type} targets should be dot-terminated"
            );
        }

        let endpoint = normalize(Endpoint::new("test.com", "MX", 0, ["10 mail.test.com"]));
        assert_eq!(endpoint.targets, vec!["10 mail.test.com."]);
    }

    #[test]
    fn test_value_targets_are_untouched() {
        let endpoint = normalize(Endpoint::new(
            "www.test.com",
            "TXT",
            0,
            ["heritage=external-dns"],
        ));
        assert_eq!(endpoint.targets, vec!["heritage=external-dns"]);

        let endpoint = normalize(Endpoint::new("www.test.com", "A", 0, ["1.2.3.4"]));
        assert_eq!(endpoint.targets, vec!["1.2.3.4"]);
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let inputs = vec![
            Endpoint::new("www.test.com", "CNAME", 0, ["test.com"]),
            Endpoint::new("www.test.com.", "A", 120, ["1.2.3.4", "5.6.7.8"]),
            Endpoint::new("test.com", "MX", 0, ["10 mail.test.com."]),
            Endpoint::new("test.com", "TXT", 0, ["v=spf1 -all"]),
        ];

        for input in inputs {
            let once = normalize(input);
            let twice = normalize(once.clone());
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn test_to_wire_rrset_one_record_per_target() {
        let endpoint = normalize(Endpoint::new(
            "www.test.com",
            "A",
            0,
            ["1.2.3.4", "5.6.7.8"],
        ));

        let rrset = to_wire_rrset(&endpoint);

        assert!(rrset.id.is_empty());
        assert_eq!(rrset.name, "www.test.com.");
        assert_eq!(rrset.record_type, RecordType::A);
        assert_eq!(rrset.ttl, 300);
        assert_eq!(
            rrset.records,
            vec![RecordItem::new("1.2.3.4"), RecordItem::new("5.6.7.8")]
        );
        assert!(rrset.records.iter().all(|r| !r.disabled));
    }

    #[test]
    fn test_to_endpoints_fans_out_records() {
        let rrsets = vec![rrset(
            "www.test.com.",
            RecordType::A,
            60,
            &["1.2.3.4", "5.6.7.8"],
        )];

        let endpoints = to_endpoints(&rrsets);

        assert_eq!(
            endpoints,
            vec![
                Endpoint::new("www.test.com.", "A", 60, ["1.2.3.4"]),
                Endpoint::new("www.test.com.", "A", 60, ["5.6.7.8"]),
            ]
        );
    }

    #[test]
    fn test_to_endpoints_drops_unsupported_types() {
        let rrsets = vec![
            rrset("test.com.", RecordType::Soa, 3600, &["ns1.selectel.org. support.selectel.ru. 1 10800 3600 604800 60"]),
            rrset("test.com.", RecordType::Caa, 3600, &["0 issue \"letsencrypt.org\""]),
            rrset("test.com.", RecordType::Ns, 86400, &["a.ns.selectel.ru."]),
            rrset("test.com.", RecordType::Other("HTTPS".to_string()), 60, &["1 . alpn=h2"]),
        ];

        let endpoints = to_endpoints(&rrsets);

        assert_eq!(endpoints.len(), 1);
        assert_eq!(endpoints[0].record_type, "NS");
    }

    #[test]
    fn test_to_endpoints_empty_record_set_yields_nothing() {
        let rrsets = vec![rrset("www.test.com.", RecordType::Txt, 60, &[])];
        assert!(to_endpoints(&rrsets).is_empty());
    }
}
