//! Synthetic feed text shaped like the live endpoint's response

/// One match row (44 fields) with the given league index and country key
pub fn match_row(index: usize, league: usize, country: i64) -> String {
    let mut fields = vec!["''".to_string(); 44];
    let set = |fields: &mut Vec<String>, pos: usize, v: &str| fields[pos] = v.to_string();

    set(&mut fields, 0, "1234567");
    set(&mut fields, 1, &league.to_string());
    set(&mut fields, 4, "'<span class=\"rank\">Alpha</span>'");
    set(&mut fields, 5, "'Beta <b>FC</b>'");
    set(&mut fields, 6, "2018");
    set(&mut fields, 7, "4");
    set(&mut fields, 8, "12");
    set(&mut fields, 9, "20");
    set(&mut fields, 10, "30");
    set(&mut fields, 11, "0");
    set(&mut fields, 19, "2");
    set(&mut fields, 20, "1");
    set(&mut fields, 21, "1");
    set(&mut fields, 22, "0");
    set(&mut fields, 23, "0");
    set(&mut fields, 24, "1");
    set(&mut fields, 25, "2");
    set(&mut fields, 26, "3");
    set(&mut fields, 33, &country.to_string());
    set(&mut fields, 37, "'1-0'");
    set(&mut fields, 38, "'0-0'");
    // a couple of omitted slots, as the endpoint emits them
    set(&mut fields, 40, "");
    set(&mut fields, 41, "");

    format!("A[{}]=[{}];", index, fields.join(","))
}

/// Complete feed with one match whose country key is `country`
pub fn feed(country: i64) -> String {
    [
        "var timestamp = 1530000000;".to_string(),
        "var A=Array(1);".to_string(),
        "var B=Array(1);".to_string(),
        "C[0]=[7,'Testland'];".to_string(),
        "B[0]=['SC','Short','Long','','','',,];".to_string(),
        match_row(0, 0, country),
        "function refresh(){ return A.length; }".to_string(),
    ]
    .join("\r\n")
}

pub const HEADER: &str = "\"League_Short\",\"League_Long\",\"Leauge_Country\",\"Home\",\"Away\",\
\"Home_Score\",\"Away_Score\",\"Home_Redcards\",\"Away_Redcards\",\"Home_Yellowcards\",\"Away_Yellowcards\",\
\"CHT_1\",\"CHT_2\",\"CHT_3\",\"CHT_4\",\"Year\",\"Month\",\"Day\",\"Hour\",\"Minute\",\"Seconds\"";

pub const ROW: &str = "\"Short\",\"Long\",\"Testland\",\"Alpha\",\"Beta FC\",2,1,0,1,2,3,\"1-0\",\"0-0\",1,0,2018,5,12,20,30,0";
