//! Normalization of grammar tags into metamodel identifiers

/// Convert a raw grammar tag into a camel-case identifier.
///
/// `_` and `.` are word boundaries: they are dropped and the next character
/// is upper-cased. Every other character is lower-cased, except the first
/// one when `class_name` is set. Doubled underscores are collapsed first.
///
/// ```
/// use edi_ect::naming::normalize;
///
/// assert_eq!(normalize("ORDER_LINE", true), "OrderLine");
/// assert_eq!(normalize("ORDER_LINE", false), "orderLine");
/// assert_eq!(normalize("sg.nad", false), "sgNad");
/// ```
#[must_use]
pub fn normalize(name: &str, class_name: bool) -> String {
    let name = name.replace("__", "_");
    let mut result = String::with_capacity(name.len());
    let mut cap = class_name;

    for ch in name.chars() {
        if ch == '_' || ch == '.' {
            cap = true;
        } else if cap {
            result.extend(ch.to_uppercase());
            cap = false;
        } else {
            result.extend(ch.to_lowercase());
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_names_start_upper_case() {
        assert_eq!(normalize("NAD", true), "Nad");
        assert_eq!(normalize("nameAndAddress", true), "Nameandaddress");
        assert_eq!(normalize("segment_group_2", true), "SegmentGroup2");
    }

    #[test]
    fn test_member_names_start_lower_case() {
        assert_eq!(normalize("NAD", false), "nad");
        assert_eq!(normalize("NAD2", false), "nad2");
        assert_eq!(normalize("party_identification", false), "partyIdentification");
    }

    #[test]
    fn test_dots_are_boundaries() {
        assert_eq!(normalize("C082.3039", false), "c0823039");
        assert_eq!(normalize("party.id", true), "PartyId");
    }

    #[test]
    fn test_doubled_separators_collapse() {
        assert_eq!(normalize("AB__cd", true), normalize("AB_cd", true));
        assert_eq!(normalize("AB__cd", true), "AbCd");
    }

    #[test]
    fn test_leading_and_trailing_separators() {
        assert_eq!(normalize("_name", false), "Name");
        assert_eq!(normalize("name_", true), "Name");
        assert_eq!(normalize("", true), "");
        assert_eq!(normalize("__", false), "");
    }

    #[test]
    fn test_other_characters_pass_through() {
        assert_eq!(normalize("A-B C", false), "a-b c");
        assert_eq!(normalize("Ärger_über", true), "ÄrgerÜber");
    }
}
