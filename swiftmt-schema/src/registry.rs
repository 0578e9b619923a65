/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Built-in sequence registry.
//!
//! Maps every supported message type to its [`SequenceStyle`] and, for the
//! generically decomposable ones, to the sequences it defines. The table is
//! built once on first use and is read-only afterwards.

use crate::schema::{BoundaryRule, MtSchema, SequenceDef, SequenceStyle};
use std::collections::HashMap;
use std::sync::LazyLock;
use swiftmt_core::types::MtType;

const GENL: SequenceDef = SequenceDef::qualified("A", "GENL");
const LINK: SequenceDef = SequenceDef::qualified("A1", "LINK");
const ADDINFO_B: SequenceDef = SequenceDef::qualified("B", "ADDINFO");
const ADDINFO_C: SequenceDef = SequenceDef::qualified("C", "ADDINFO");
const ADDINFO_D: SequenceDef = SequenceDef::qualified("D", "ADDINFO");
const ADDINFO_E: SequenceDef = SequenceDef::qualified("E", "ADDINFO");
const ADDINFO_F: SequenceDef = SequenceDef::qualified("F", "ADDINFO");

/// Settlement instructions and confirmations (MT540 to MT547).
const SETTLEMENT: &[SequenceDef] = &[
    GENL,
    LINK,
    SequenceDef::qualified("B", "TRADDET"),
    SequenceDef::qualified("B1", "FIA"),
    SequenceDef::qualified("C", "FIAC"),
    SequenceDef::qualified("D", "REPO"),
    SequenceDef::qualified("E", "SETDET"),
    SequenceDef::qualified("E1", "SETPRTY"),
    SequenceDef::qualified("E2", "CSHPRTY"),
    SequenceDef::qualified("E3", "AMT"),
    SequenceDef::qualified("F", "OTHRPRTY"),
];

const SETTLEMENT_STATUS: &[SequenceDef] = &[
    GENL,
    LINK,
    SequenceDef::qualified("A2", "STAT"),
    SequenceDef::qualified("A2a", "REAS"),
    SequenceDef::qualified("B", "SETTRAN"),
    SequenceDef::qualified("B1", "SETPRTY"),
    ADDINFO_C,
];

const TRADE_STATUS: &[SequenceDef] = &[
    GENL,
    LINK,
    SequenceDef::qualified("A2", "STAT"),
    SequenceDef::qualified("A2a", "REAS"),
    SequenceDef::qualified("B", "TRADE"),
    ADDINFO_C,
];

const ORDER: &[SequenceDef] = &[
    GENL,
    LINK,
    SequenceDef::qualified("B", "ORDRDET"),
    SequenceDef::qualified("B1", "PRIC"),
    SequenceDef::qualified("B2", "TRADPRTY"),
    SequenceDef::qualified("C", "SETDET"),
    SequenceDef::qualified("C1", "SETPRTY"),
    SequenceDef::qualified("C2", "CSHPRTY"),
    SequenceDef::qualified("C3", "AMT"),
    SequenceDef::qualified("D", "OTHRPRTY"),
];

const CONFIRMATION: &[SequenceDef] = &[
    GENL,
    LINK,
    SequenceDef::qualified("B", "CONFDET"),
    SequenceDef::qualified("B1", "CONFPRTY"),
    SequenceDef::qualified("B2", "FIA"),
    SequenceDef::qualified("C", "SETDET"),
    SequenceDef::qualified("C1", "SETPRTY"),
    SequenceDef::qualified("C2", "CSHPRTY"),
    SequenceDef::qualified("C3", "AMT"),
    SequenceDef::qualified("D", "OTHRPRTY"),
];

const COLLATERAL: &[SequenceDef] = &[
    GENL,
    LINK,
    SequenceDef::qualified("B", "SUMM"),
    SequenceDef::qualified("C", "SUMC"),
    SequenceDef::qualified("C1", "SECMOVE"),
    SequenceDef::qualified("C2", "CASHMOVE"),
    ADDINFO_D,
];

const STATEMENT_HOLDINGS: &[SequenceDef] = &[
    GENL,
    LINK,
    SequenceDef::qualified("B", "SUBSAFE"),
    SequenceDef::qualified("B1", "FIN"),
    SequenceDef::qualified("B1a", "FIA"),
    SequenceDef::qualified("B1b", "SUBBAL"),
    ADDINFO_C,
];

const STATEMENT_TRANSACTIONS: &[SequenceDef] = &[
    GENL,
    LINK,
    SequenceDef::qualified("B", "SUBSAFE"),
    SequenceDef::qualified("B1", "FIN"),
    SequenceDef::qualified("B1a", "TRAN"),
    ADDINFO_C,
];

const STATEMENT_PENDING: &[SequenceDef] = &[
    GENL,
    LINK,
    SequenceDef::qualified("B", "STAT"),
    SequenceDef::qualified("B1", "REAS"),
    SequenceDef::qualified("B2", "TRAN"),
    SequenceDef::qualified("C", "TRANS"),
    ADDINFO_D,
];

const CORPORATE_ACTION_NOTIFICATION: &[SequenceDef] = &[
    GENL,
    LINK,
    SequenceDef::qualified("B", "USECU"),
    SequenceDef::qualified("B1", "FIA"),
    SequenceDef::qualified("B2", "ACCTINFO"),
    SequenceDef::qualified("C", "INTSEC"),
    SequenceDef::qualified("D", "CADETL"),
    SequenceDef::qualified("E", "CAOPTN"),
    SequenceDef::qualified("E1", "SECMOVE"),
    SequenceDef::qualified("E2", "CASHMOVE"),
    ADDINFO_F,
];

const CORPORATE_ACTION_INSTRUCTION: &[SequenceDef] = &[
    GENL,
    LINK,
    SequenceDef::qualified("B", "USECU"),
    SequenceDef::qualified("B1", "FIA"),
    SequenceDef::qualified("B2", "ACCTINFO"),
    SequenceDef::qualified("C", "CADETL"),
    SequenceDef::qualified("D", "CAINST"),
    ADDINFO_E,
];

const CORPORATE_ACTION_CONFIRMATION: &[SequenceDef] = &[
    GENL,
    LINK,
    SequenceDef::qualified("B", "USECU"),
    SequenceDef::qualified("B1", "FIA"),
    SequenceDef::qualified("C", "INTSEC"),
    SequenceDef::qualified("D", "CADETL"),
    SequenceDef::qualified("E", "CACONF"),
    SequenceDef::qualified("E1", "SECMOVE"),
    SequenceDef::qualified("E2", "CASHMOVE"),
    ADDINFO_F,
];

const CORPORATE_ACTION_STATUS: &[SequenceDef] = &[
    GENL,
    LINK,
    SequenceDef::qualified("A2", "STAT"),
    SequenceDef::qualified("A2a", "REAS"),
    SequenceDef::qualified("B", "CADETL"),
    ADDINFO_C,
];

const CORPORATE_ACTION_NARRATIVE: &[SequenceDef] = &[
    GENL,
    LINK,
    SequenceDef::qualified("B", "USECU"),
    ADDINFO_C,
];

/// Requests and cancellations carrying only general and additional information.
const STATUS_REQUEST: &[SequenceDef] = &[GENL, LINK, ADDINFO_B];

const TREASURY_DEAL: &[SequenceDef] = &[
    GENL,
    LINK,
    SequenceDef::qualified("B", "DEALTRAN"),
    SequenceDef::qualified("C", "SETDET"),
    SequenceDef::qualified("C1", "CSHPRTY"),
    SequenceDef::qualified("D", "OTHRPRTY"),
];

const STANDING_INSTRUCTIONS: &[SequenceDef] = &[
    GENL,
    LINK,
    SequenceDef::qualified("B", "SSIDET"),
    SequenceDef::qualified("B1", "SETPRTY"),
    SequenceDef::qualified("B2", "CSHPRTY"),
];

const CUSTOMER_TRANSFERS: &[SequenceDef] = &[SequenceDef::span(
    "B",
    &["21"],
    &["59", "59A", "59F"],
    &["70", "77B", "33B", "71A", "25A", "36"],
)];

const CUSTOMER_TRANSFERS_STP: &[SequenceDef] = &[SequenceDef::span(
    "B",
    &["21"],
    &["59", "59A", "59F"],
    &["70", "26T", "77B", "33B", "71A", "71F", "71G", "36"],
)];

const DIRECT_DEBITS: &[SequenceDef] = &[SequenceDef::span(
    "B",
    &["21"],
    &["59", "59A"],
    &["70", "26T", "77B", "33B", "71A", "71F", "71G", "36"],
)];

const CHEQUE_ADVICES: &[SequenceDef] = &[SequenceDef::span(
    "B",
    &["21"],
    &["59", "59F"],
    &["75"],
)];

const FI_TRANSFERS: &[SequenceDef] = &[SequenceDef::span(
    "B",
    &["20"],
    &["58A", "58D"],
    &["72"],
)];

const FI_OWN_ACCOUNT: &[SequenceDef] = &[SequenceDef::span(
    "B",
    &["20"],
    &["57A", "57B", "57D"],
    &["72"],
)];

/// Every registered message type.
static TABLE: &[MtSchema] = &[
    // Category 1: customer payments and cheques
    MtSchema::spans("101", CUSTOMER_TRANSFERS),
    MtSchema::spans("102", CUSTOMER_TRANSFERS_STP),
    MtSchema::custom("103"),
    MtSchema::spans("104", DIRECT_DEBITS),
    MtSchema::custom("105"),
    MtSchema::spans("107", DIRECT_DEBITS),
    MtSchema::spans("110", CHEQUE_ADVICES),
    MtSchema::custom("111"),
    MtSchema::custom("112"),
    MtSchema::custom("190"),
    MtSchema::custom("191"),
    MtSchema::custom("192"),
    MtSchema::custom("195"),
    MtSchema::custom("196"),
    MtSchema::custom("198"),
    MtSchema::custom("199"),
    // Category 2: financial institution transfers
    MtSchema::custom("200"),
    MtSchema::spans("201", FI_OWN_ACCOUNT),
    MtSchema::custom("202"),
    MtSchema::spans("203", FI_TRANSFERS),
    MtSchema::custom("204"),
    MtSchema::custom("205"),
    MtSchema::custom("206"),
    MtSchema::custom("207"),
    MtSchema::custom("210"),
    MtSchema::custom("256"),
    MtSchema::custom("290"),
    MtSchema::custom("291"),
    MtSchema::custom("292"),
    MtSchema::custom("295"),
    MtSchema::custom("296"),
    MtSchema::custom("298"),
    MtSchema::custom("299"),
    // Category 3: treasury markets
    MtSchema::split("300", "ABCDE"),
    MtSchema::split("303", "ABCD"),
    MtSchema::split("304", "ABCDE"),
    MtSchema::custom("305"),
    MtSchema::split("306", "ABCDEFGHIJ"),
    MtSchema::split("307", "ABCD"),
    MtSchema::split("308", "ABC"),
    MtSchema::split("320", "ABCDEFGHI"),
    MtSchema::paired("321", TREASURY_DEAL),
    MtSchema::split("330", "ABCDEFG"),
    MtSchema::split("340", "ABCDEF"),
    MtSchema::split("341", "ABCD"),
    MtSchema::split("350", "ABCD"),
    MtSchema::split("360", "ABCDEFGHIJKLMN"),
    MtSchema::split("361", "ABCDEFGHIJKLMN"),
    MtSchema::split("362", "ABCDE"),
    MtSchema::split("364", "ABCDEFGHIJKLM"),
    MtSchema::split("365", "ABCDEFGHIJKLM"),
    MtSchema::split("370", "AB"),
    MtSchema::split("380", "AB"),
    MtSchema::split("381", "AB"),
    MtSchema::custom("390"),
    MtSchema::custom("391"),
    MtSchema::custom("392"),
    MtSchema::custom("395"),
    MtSchema::custom("396"),
    MtSchema::custom("398"),
    MtSchema::custom("399"),
    // Category 4: collections and cash letters
    MtSchema::custom("400"),
    MtSchema::custom("405"),
    MtSchema::custom("410"),
    MtSchema::custom("412"),
    MtSchema::custom("416"),
    MtSchema::custom("420"),
    MtSchema::custom("422"),
    MtSchema::custom("430"),
    MtSchema::custom("450"),
    MtSchema::custom("455"),
    MtSchema::custom("456"),
    MtSchema::custom("490"),
    MtSchema::custom("491"),
    MtSchema::custom("492"),
    MtSchema::custom("495"),
    MtSchema::custom("496"),
    MtSchema::custom("498"),
    MtSchema::custom("499"),
    // Category 5: securities markets
    MtSchema::paired("500", CORPORATE_ACTION_NARRATIVE),
    MtSchema::paired("501", CORPORATE_ACTION_NARRATIVE),
    MtSchema::paired("502", ORDER),
    MtSchema::paired("503", COLLATERAL),
    MtSchema::paired("504", COLLATERAL),
    MtSchema::paired("505", COLLATERAL),
    MtSchema::paired("506", COLLATERAL),
    MtSchema::paired("507", COLLATERAL),
    MtSchema::paired("508", STATEMENT_HOLDINGS),
    MtSchema::paired("509", TRADE_STATUS),
    MtSchema::paired("510", TRADE_STATUS),
    MtSchema::paired("513", ORDER),
    MtSchema::paired("514", ORDER),
    MtSchema::paired("515", CONFIRMATION),
    MtSchema::custom("516"),
    MtSchema::paired("517", TRADE_STATUS),
    MtSchema::paired("518", CONFIRMATION),
    MtSchema::paired("519", STATEMENT_HOLDINGS),
    MtSchema::paired("524", STATEMENT_HOLDINGS),
    MtSchema::custom("526"),
    MtSchema::paired("527", COLLATERAL),
    MtSchema::paired("530", TRADE_STATUS),
    MtSchema::paired("535", STATEMENT_HOLDINGS),
    MtSchema::paired("536", STATEMENT_TRANSACTIONS),
    MtSchema::paired("537", STATEMENT_PENDING),
    MtSchema::paired("538", STATEMENT_TRANSACTIONS),
    MtSchema::paired("540", SETTLEMENT),
    MtSchema::paired("541", SETTLEMENT),
    MtSchema::paired("542", SETTLEMENT),
    MtSchema::paired("543", SETTLEMENT),
    MtSchema::paired("544", SETTLEMENT),
    MtSchema::paired("545", SETTLEMENT),
    MtSchema::paired("546", SETTLEMENT),
    MtSchema::paired("547", SETTLEMENT),
    MtSchema::paired("548", SETTLEMENT_STATUS),
    MtSchema::paired("549", STATUS_REQUEST),
    MtSchema::paired("558", COLLATERAL),
    MtSchema::custom("559"),
    MtSchema::paired("564", CORPORATE_ACTION_NOTIFICATION),
    MtSchema::paired("565", CORPORATE_ACTION_INSTRUCTION),
    MtSchema::paired("566", CORPORATE_ACTION_CONFIRMATION),
    MtSchema::paired("567", CORPORATE_ACTION_STATUS),
    MtSchema::paired("568", CORPORATE_ACTION_NARRATIVE),
    MtSchema::paired("569", COLLATERAL),
    MtSchema::paired("575", STATEMENT_TRANSACTIONS),
    MtSchema::paired("576", STATEMENT_HOLDINGS),
    MtSchema::paired("578", SETTLEMENT),
    MtSchema::custom("581"),
    MtSchema::paired("586", STATEMENT_TRANSACTIONS),
    MtSchema::custom("590"),
    MtSchema::custom("591"),
    MtSchema::custom("592"),
    MtSchema::custom("595"),
    MtSchema::custom("596"),
    MtSchema::custom("598"),
    MtSchema::custom("599"),
    // Category 6: treasury markets, precious metals and syndications
    MtSchema::split("600", "ABCD"),
    MtSchema::split("601", "ABCD"),
    MtSchema::custom("604"),
    MtSchema::custom("605"),
    MtSchema::custom("606"),
    MtSchema::custom("607"),
    MtSchema::custom("608"),
    MtSchema::custom("609"),
    MtSchema::split("620", "ABCDEFG"),
    MtSchema::custom("643"),
    MtSchema::custom("644"),
    MtSchema::custom("645"),
    MtSchema::custom("646"),
    MtSchema::custom("649"),
    MtSchema::paired("670", STANDING_INSTRUCTIONS),
    MtSchema::paired("671", STANDING_INSTRUCTIONS),
    MtSchema::custom("690"),
    MtSchema::custom("691"),
    MtSchema::custom("692"),
    MtSchema::custom("695"),
    MtSchema::custom("696"),
    MtSchema::custom("698"),
    MtSchema::custom("699"),
    // Category 7: documentary credits and guarantees
    MtSchema::custom("700"),
    MtSchema::custom("701"),
    MtSchema::custom("705"),
    MtSchema::custom("707"),
    MtSchema::custom("708"),
    MtSchema::custom("710"),
    MtSchema::custom("711"),
    MtSchema::custom("720"),
    MtSchema::custom("721"),
    MtSchema::custom("730"),
    MtSchema::custom("732"),
    MtSchema::custom("734"),
    MtSchema::custom("740"),
    MtSchema::custom("742"),
    MtSchema::custom("744"),
    MtSchema::custom("747"),
    MtSchema::custom("750"),
    MtSchema::custom("752"),
    MtSchema::custom("754"),
    MtSchema::custom("756"),
    MtSchema::custom("759"),
    MtSchema::custom("760"),
    MtSchema::custom("761"),
    MtSchema::custom("765"),
    MtSchema::custom("767"),
    MtSchema::custom("768"),
    MtSchema::custom("769"),
    MtSchema::custom("775"),
    MtSchema::custom("785"),
    MtSchema::custom("786"),
    MtSchema::custom("787"),
    MtSchema::custom("790"),
    MtSchema::custom("791"),
    MtSchema::custom("792"),
    MtSchema::custom("795"),
    MtSchema::custom("796"),
    MtSchema::custom("798"),
    MtSchema::custom("799"),
    // Category 8: travellers cheques
    MtSchema::custom("801"),
    MtSchema::custom("802"),
    MtSchema::custom("810"),
    MtSchema::custom("812"),
    MtSchema::custom("813"),
    MtSchema::custom("820"),
    MtSchema::custom("821"),
    MtSchema::custom("822"),
    MtSchema::custom("823"),
    MtSchema::custom("824"),
    MtSchema::custom("890"),
    MtSchema::custom("891"),
    MtSchema::custom("892"),
    MtSchema::custom("895"),
    MtSchema::custom("896"),
    MtSchema::custom("898"),
    MtSchema::custom("899"),
    // Category 9: cash management and customer status
    MtSchema::custom("900"),
    MtSchema::custom("910"),
    MtSchema::custom("920"),
    MtSchema::custom("935"),
    MtSchema::custom("940"),
    MtSchema::custom("941"),
    MtSchema::custom("942"),
    MtSchema::custom("950"),
    MtSchema::custom("960"),
    MtSchema::custom("961"),
    MtSchema::custom("962"),
    MtSchema::custom("963"),
    MtSchema::custom("964"),
    MtSchema::custom("965"),
    MtSchema::custom("966"),
    MtSchema::custom("967"),
    MtSchema::custom("970"),
    MtSchema::custom("971"),
    MtSchema::custom("972"),
    MtSchema::custom("973"),
    MtSchema::custom("980"),
    MtSchema::custom("981"),
    MtSchema::custom("985"),
    MtSchema::custom("986"),
    MtSchema::custom("990"),
    MtSchema::custom("991"),
    MtSchema::custom("992"),
    MtSchema::custom("995"),
    MtSchema::custom("996"),
    MtSchema::custom("998"),
    MtSchema::custom("999"),
];

static REGISTRY: LazyLock<HashMap<&'static str, &'static MtSchema>> =
    LazyLock::new(|| TABLE.iter().map(|schema| (schema.mt, schema)).collect());

/// Returns the registry entry for a message type.
///
/// Decorated names (`MT540`, `102_STP`) are normalized first.
#[must_use]
pub fn schema(mt: &str) -> Option<&'static MtSchema> {
    let mt = MtType::normalize(mt)?;
    REGISTRY.get(mt.as_str()).copied()
}

/// Returns the boundary style of a message type.
///
/// Unregistered or malformed message types yield [`SequenceStyle::Unknown`].
#[must_use]
pub fn style_for(mt: &str) -> SequenceStyle {
    schema(mt).map_or(SequenceStyle::Unknown, |schema| schema.style)
}

/// Returns the boundary rule for one sequence of a message type.
///
/// # Returns
/// * `Some(BoundaryRule::Unknown)` if the message type is not registered
/// * `Some(BoundaryRule::Custom)` if the message type uses bespoke logic,
///   whatever the sequence name
/// * `None` if the message type is registered but does not define `sequence`
#[must_use]
pub fn rule_for(mt: &str, sequence: &str) -> Option<BoundaryRule> {
    let Some(schema) = schema(mt) else {
        return Some(BoundaryRule::Unknown);
    };
    match schema.style {
        SequenceStyle::Custom => Some(BoundaryRule::Custom),
        SequenceStyle::Unknown => Some(BoundaryRule::Unknown),
        _ => schema.sequence(sequence).map(|def| def.rule()),
    }
}

/// Returns the names of the sequences a message type defines.
///
/// Empty for custom and unregistered message types.
#[must_use]
pub fn sequence_names(mt: &str) -> Vec<&'static str> {
    schema(mt).map(MtSchema::sequence_names).unwrap_or_default()
}

/// Returns every registered message type, in ascending order.
#[must_use]
pub fn registered_types() -> Vec<&'static str> {
    let mut types: Vec<&'static str> = REGISTRY.keys().copied().collect();
    types.sort_unstable();
    types
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_table_has_no_duplicates() {
        let unique: HashSet<&str> = TABLE.iter().map(|s| s.mt).collect();
        assert_eq!(unique.len(), TABLE.len());
        assert!(TABLE.len() >= 240);
        assert!(TABLE.iter().all(|s| MtType::new(s.mt).is_some()));
    }

    #[test]
    fn test_style_for() {
        assert_eq!(style_for("300"), SequenceStyle::SplitByMarkerLetter);
        assert_eq!(style_for("540"), SequenceStyle::PairedQualifierBlocks);
        assert_eq!(style_for("MT101"), SequenceStyle::FixedSpanWithOptionalTail);
        assert_eq!(style_for("103"), SequenceStyle::Custom);
        assert_eq!(style_for("103_STP"), SequenceStyle::Custom);
        assert_eq!(style_for("000"), SequenceStyle::Unknown);
        assert_eq!(style_for("garbage"), SequenceStyle::Unknown);
    }

    #[test]
    fn test_rule_for_marker_letter() {
        assert_eq!(
            rule_for("300", "B"),
            Some(BoundaryRule::split_by_marker("15").with_letter('B'))
        );
        assert_eq!(rule_for("300", "Z"), None);
    }

    #[test]
    fn test_rule_for_paired() {
        assert_eq!(
            rule_for("540", "E1"),
            Some(BoundaryRule::paired_blocks().with_qualifier("SETPRTY"))
        );
        assert_eq!(
            rule_for("548", "A2a"),
            Some(BoundaryRule::paired_blocks().with_qualifier("REAS"))
        );
        assert_eq!(rule_for("540", "Q"), None);
    }

    #[test]
    fn test_rule_for_fixed_span() {
        let Some(BoundaryRule::FixedSpanWithOptionalTail(span)) = rule_for("101", "B") else {
            panic!("expected a fixed span rule");
        };
        assert_eq!(span.name, "B");
        assert_eq!(span.start, vec!["21".to_string()]);
        assert!(span.end.contains(&"59A".to_string()));
    }

    #[test]
    fn test_rule_for_custom_and_unknown() {
        assert_eq!(rule_for("103", "A"), Some(BoundaryRule::Custom));
        assert_eq!(rule_for("103", "anything"), Some(BoundaryRule::Custom));
        assert_eq!(rule_for("012", "A"), Some(BoundaryRule::Unknown));
    }

    #[test]
    fn test_sequence_names() {
        assert_eq!(sequence_names("300"), vec!["A", "B", "C", "D", "E"]);
        assert_eq!(sequence_names("540")[..3], ["A", "A1", "B"]);
        assert!(sequence_names("103").is_empty());
        assert!(sequence_names("012").is_empty());
    }

    #[test]
    fn test_every_registered_sequence_has_a_rule() {
        for mt in registered_types() {
            for name in sequence_names(mt) {
                let rule = rule_for(mt, name);
                assert!(
                    rule.as_ref().is_some_and(BoundaryRule::is_generic),
                    "MT{mt} sequence {name} has no generic rule"
                );
            }
        }
    }
}
