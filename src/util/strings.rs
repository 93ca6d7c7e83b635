const TRUE_VALUES: [&str; 4] = ["true", "yes", "1", "::ixnet::ok"];
const FALSE_VALUES: [&str; 6] = ["false", "no", "0", "null", "none", "::ixnet::obj-null"];
const LOCAL_HOST_VALUES: [&str; 4] = ["localhost", "127.0.0.1", "offline", "null"];

fn lower_in(
    s: &str,
    values: &[&str],
) -> bool {
    let lower = s.to_lowercase();

    values.contains(&lower.as_str())
}

/// Returns true if the vendor string `s` represents a true value.
#[must_use]
pub fn is_true(s: &str) -> bool {
    lower_in(s, &TRUE_VALUES)
}

/// Returns true if the vendor string `s` represents a false (or null) value. Note that a string
/// may be neither true nor false.
#[must_use]
pub fn is_false(s: &str) -> bool {
    lower_in(s, &FALSE_VALUES)
}

/// Returns true if `location` (`ip[/slot[/port]]`) represents the local host or an offline
/// chassis.
#[must_use]
pub fn is_local_host(location: &str) -> bool {
    let lower = location.to_lowercase();

    LOCAL_HOST_VALUES.iter().any(|v| lower.contains(v))
}

/// Returns true if `s` names an IPv4 protocol/interface type.
#[must_use]
pub fn is_ipv4(s: &str) -> bool {
    lower_in(s, &["ipv4", "ipv4if"])
}

/// Returns true if `s` names an IPv6 protocol/interface type.
#[must_use]
pub fn is_ipv6(s: &str) -> bool {
    lower_in(s, &["ipv6", "ipv6if"])
}

/// Returns true if `s` names either IP protocol/interface type.
#[must_use]
pub fn is_ip(s: &str) -> bool {
    is_ipv4(s) || is_ipv6(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_true_false() {
        for s in ["False", "false", "0", "null", "NONE", "none", "::ixnet::obj-null"] {
            assert!(is_false(s), "{s}");
            assert!(!is_true(s), "{s}");
        }

        for s in ["True", "TRUE", "1", "yes", "::ixNet::OK"] {
            assert!(is_true(s), "{s}");
            assert!(!is_false(s), "{s}");
        }

        assert!(!is_true("maybe"));
        assert!(!is_false("maybe"));
    }

    #[test]
    fn test_local_host() {
        for s in ["127.0.0.1", "localhost", "Localhost/1/1", "//(Offline)/1/1", "null"] {
            assert!(is_local_host(s), "{s}");
        }

        for s in ["1.2.3.4", "hostname", "192.168.1.1/1/2"] {
            assert!(!is_local_host(s), "{s}");
        }
    }

    #[test]
    fn test_ips() {
        for s in ["IPV4", "ipv6", "ipv4if", "IPV6IF"] {
            assert!(is_ip(s), "{s}");
        }

        assert!(is_ipv4("IPv4If"));
        assert!(!is_ipv4("ipv6"));
        assert!(is_ipv6("Ipv6"));

        for s in ["mac", "bla"] {
            assert!(!is_ip(s), "{s}");
        }
    }
}
