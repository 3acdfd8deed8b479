//! Layout of the live-score feed: which field means what
//!
//! Positions nobody has identified are `None` and never exported.
//! Names ending in `?` are best guesses.

use crate::error::Result;
use crate::join::JoinPlan;
use crate::model::ColumnSchema;
use crate::output::{ExportColumn, ExportSpec, Transform};

/// Primary table: one row per match
pub const MATCH_TABLE: char = 'A';
/// Positional lookup table: one row per league
pub const LEAGUE_TABLE: char = 'B';

/// Record field receiving the keyed-table (country) value
pub const COUNTRY_COLUMN: &str = "Leauge_Country";

// Ten per line to keep positions countable
const MATCH_COLUMNS: [Option<&str>; 44] = [
    None, Some("B_KEY"), None, None, Some("Home"), Some("Away"), Some("Year"), Some("Month"), Some("Day"), Some("Hour"),
    Some("Minute"), Some("Seconds"), Some("Year2?"), Some("Month2?"), Some("Day2?"), Some("Hour2?"), Some("Minutes2?"), Some("Seconds2?"), None, Some("Home_Score"),
    Some("Away_Score"), Some("CHT_3"), Some("CHT_4"), Some("Home_Redcards"), Some("Away_Redcards"), Some("Home_Yellowcards"), Some("Away_Yellowcards"), None, None, None,
    Some("Bool?"), None, Some("Currency?"), Some("C_KEY"), None, None, None, Some("CHT_1"), Some("CHT_2"), None,
    None, None, None, None,
];

const LEAGUE_COLUMNS: [Option<&str>; 8] = [
    Some("sclassid"), Some("League_Short"), Some("League_Long"), Some("Color?"), None, Some("Link?"), None, None,
];

/// Match/league/country join used by the feed
pub fn join_plan() -> Result<JoinPlan> {
    JoinPlan::new(
        ColumnSchema::new(MATCH_TABLE, MATCH_COLUMNS)?,
        ColumnSchema::new(LEAGUE_TABLE, LEAGUE_COLUMNS)?,
        "B_KEY",
        "C_KEY",
        COUNTRY_COLUMN,
    )
}

/// Default export list
pub fn export_spec() -> ExportSpec {
    let mut columns = vec![
        ExportColumn::copy("League_Short"),
        ExportColumn::copy("League_Long"),
        ExportColumn::copy(COUNTRY_COLUMN),
        // team names may carry <span> markup
        ExportColumn::computed("Home", Transform::StripTags("Home".into())),
        ExportColumn::computed("Away", Transform::StripTags("Away".into())),
    ];
    columns.extend(
        [
            "Home_Score",
            "Away_Score",
            "Home_Redcards",
            "Away_Redcards",
            "Home_Yellowcards",
            "Away_Yellowcards",
            "CHT_1",
            "CHT_2",
            "CHT_3",
            "CHT_4",
            "Year",
        ]
        .into_iter()
        .map(ExportColumn::copy),
    );
    // months count from 0 in the feed
    columns.push(ExportColumn::computed(
        "Month",
        Transform::Offset {
            column: "Month".into(),
            by: 1,
        },
    ));
    columns.extend(["Day", "Hour", "Minute", "Seconds"].into_iter().map(ExportColumn::copy));

    ExportSpec::new(columns)
}
