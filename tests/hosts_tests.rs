use hostsweep::hosts::{validate_prefix, HostRange};

#[test]
fn expansion_is_literal_concatenation_in_order() {
    let range = HostRange::new("10.0.0.", 8, 10);
    let hosts: Vec<String> = range.iter().collect();
    assert_eq!(hosts, vec!["10.0.0.8", "10.0.0.9", "10.0.0.10"]);
}

#[test]
fn expansion_count_matches_inclusive_bounds() {
    let range = HostRange::new("192.168.1.", 1, 254);
    assert_eq!(range.len(), 254);
    assert_eq!(range.iter().count(), 254);
}

#[test]
fn expansion_is_restartable() {
    let range = HostRange::new("192.168.1.", 1, 3);
    let first: Vec<String> = range.iter().collect();
    let second: Vec<String> = range.iter().collect();
    assert_eq!(first, second);
}

#[test]
fn out_of_octet_suffixes_are_still_generated() {
    // Only the representative `<prefix>1` address is validated up front;
    // everything else is produced verbatim and left to fail at connect time.
    let range = HostRange::new("10.0.0.", 254, 256);
    let hosts: Vec<String> = range.iter().collect();
    assert_eq!(hosts, vec!["10.0.0.254", "10.0.0.255", "10.0.0.256"]);
}

#[test]
fn prefix_validation_checks_the_representative_address() {
    assert!(validate_prefix("192.168.1.").is_ok());
    assert!(validate_prefix("192.168.").is_err());
    assert!(validate_prefix("300.0.0.").is_err());
}
