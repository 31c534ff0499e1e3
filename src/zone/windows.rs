//! Windows time-zone label to IANA name mapping.
//!
//! Exchange and Outlook emit TZID values like `W. Europe Standard Time` or
//! full display labels like `(UTC+01:00) Amsterdam, Berlin, Bern, Rome`.
//! The table below carries the CLDR windowsZones identifiers plus the city
//! names that appear in display labels, so that segment matching can land
//! on an IANA zone even when only part of a label survives transport.

/// One row of the Windows → IANA mapping.
///
/// `iana` lists candidate zone names in preference order; resolution takes
/// the first entry.
pub struct WindowsZone {
    /// Windows time-zone identifier or display-label city name.
    pub label: &'static str,
    /// IANA zone names, most representative first.
    pub iana: &'static [&'static str],
}

const fn row(label: &'static str, iana: &'static [&'static str]) -> WindowsZone {
    WindowsZone { label, iana }
}

/// Windows time-zone identifiers (CLDR windowsZones, territory `001`).
pub static WINDOWS_ZONES: &[WindowsZone] = &[
    row("Dateline Standard Time", &["Etc/GMT+12"]),
    row("UTC-11", &["Etc/GMT+11"]),
    row("Aleutian Standard Time", &["America/Adak"]),
    row("Hawaiian Standard Time", &["Pacific/Honolulu"]),
    row("Marquesas Standard Time", &["Pacific/Marquesas"]),
    row("Alaskan Standard Time", &["America/Anchorage"]),
    row("UTC-09", &["Etc/GMT+9"]),
    row("Pacific Standard Time (Mexico)", &["America/Tijuana"]),
    row("UTC-08", &["Etc/GMT+8"]),
    row("Pacific Standard Time", &["America/Los_Angeles"]),
    row("US Mountain Standard Time", &["America/Phoenix"]),
    row("Mountain Standard Time (Mexico)", &["America/Mazatlan"]),
    row("Mountain Standard Time", &["America/Denver"]),
    row("Yukon Standard Time", &["America/Whitehorse"]),
    row("Central America Standard Time", &["America/Guatemala"]),
    row("Central Standard Time", &["America/Chicago"]),
    row("Easter Island Standard Time", &["Pacific/Easter"]),
    row("Central Standard Time (Mexico)", &["America/Mexico_City"]),
    row("Canada Central Standard Time", &["America/Regina"]),
    row("SA Pacific Standard Time", &["America/Bogota"]),
    row("Eastern Standard Time (Mexico)", &["America/Cancun"]),
    row("Eastern Standard Time", &["America/New_York"]),
    row("Haiti Standard Time", &["America/Port-au-Prince"]),
    row("Cuba Standard Time", &["America/Havana"]),
    row("US Eastern Standard Time", &["America/Indiana/Indianapolis"]),
    row("Turks And Caicos Standard Time", &["America/Grand_Turk"]),
    row("Paraguay Standard Time", &["America/Asuncion"]),
    row("Atlantic Standard Time", &["America/Halifax"]),
    row("Venezuela Standard Time", &["America/Caracas"]),
    row("Central Brazilian Standard Time", &["America/Cuiaba"]),
    row("SA Western Standard Time", &["America/La_Paz"]),
    row("Pacific SA Standard Time", &["America/Santiago"]),
    row("Newfoundland Standard Time", &["America/St_Johns"]),
    row("Tocantins Standard Time", &["America/Araguaina"]),
    row("E. South America Standard Time", &["America/Sao_Paulo"]),
    row("SA Eastern Standard Time", &["America/Cayenne"]),
    row("Argentina Standard Time", &["America/Argentina/Buenos_Aires"]),
    row("Greenland Standard Time", &["America/Godthab"]),
    row("Montevideo Standard Time", &["America/Montevideo"]),
    row("Magallanes Standard Time", &["America/Punta_Arenas"]),
    row("Saint Pierre Standard Time", &["America/Miquelon"]),
    row("Bahia Standard Time", &["America/Bahia"]),
    row("UTC-02", &["Etc/GMT+2"]),
    row("Azores Standard Time", &["Atlantic/Azores"]),
    row("Cape Verde Standard Time", &["Atlantic/Cape_Verde"]),
    row("UTC", &["Etc/UTC"]),
    row("GMT Standard Time", &["Europe/London"]),
    row("Greenwich Standard Time", &["Atlantic/Reykjavik"]),
    row("Sao Tome Standard Time", &["Africa/Sao_Tome"]),
    row("Morocco Standard Time", &["Africa/Casablanca"]),
    row("W. Europe Standard Time", &["Europe/Berlin", "Europe/Amsterdam", "Europe/Rome"]),
    row("Central Europe Standard Time", &["Europe/Budapest", "Europe/Prague"]),
    row("Romance Standard Time", &["Europe/Paris", "Europe/Brussels", "Europe/Madrid"]),
    row("Central European Standard Time", &["Europe/Warsaw", "Europe/Zagreb"]),
    row("W. Central Africa Standard Time", &["Africa/Lagos"]),
    row("Jordan Standard Time", &["Asia/Amman"]),
    row("GTB Standard Time", &["Europe/Bucharest", "Europe/Athens"]),
    row("Middle East Standard Time", &["Asia/Beirut"]),
    row("Egypt Standard Time", &["Africa/Cairo"]),
    row("E. Europe Standard Time", &["Europe/Chisinau"]),
    row("Syria Standard Time", &["Asia/Damascus"]),
    row("West Bank Standard Time", &["Asia/Hebron"]),
    row("South Africa Standard Time", &["Africa/Johannesburg"]),
    row("FLE Standard Time", &["Europe/Kyiv", "Europe/Helsinki", "Europe/Riga"]),
    row("Israel Standard Time", &["Asia/Jerusalem"]),
    row("South Sudan Standard Time", &["Africa/Juba"]),
    row("Kaliningrad Standard Time", &["Europe/Kaliningrad"]),
    row("Sudan Standard Time", &["Africa/Khartoum"]),
    row("Libya Standard Time", &["Africa/Tripoli"]),
    row("Namibia Standard Time", &["Africa/Windhoek"]),
    row("Arabic Standard Time", &["Asia/Baghdad"]),
    row("Turkey Standard Time", &["Europe/Istanbul"]),
    row("Arab Standard Time", &["Asia/Riyadh"]),
    row("Belarus Standard Time", &["Europe/Minsk"]),
    row("Russian Standard Time", &["Europe/Moscow"]),
    row("E. Africa Standard Time", &["Africa/Nairobi"]),
    row("Volgograd Standard Time", &["Europe/Volgograd"]),
    row("Iran Standard Time", &["Asia/Tehran"]),
    row("Arabian Standard Time", &["Asia/Dubai"]),
    row("Astrakhan Standard Time", &["Europe/Astrakhan"]),
    row("Azerbaijan Standard Time", &["Asia/Baku"]),
    row("Russia Time Zone 3", &["Europe/Samara"]),
    row("Mauritius Standard Time", &["Indian/Mauritius"]),
    row("Saratov Standard Time", &["Europe/Saratov"]),
    row("Georgian Standard Time", &["Asia/Tbilisi"]),
    row("Caucasus Standard Time", &["Asia/Yerevan"]),
    row("Afghanistan Standard Time", &["Asia/Kabul"]),
    row("West Asia Standard Time", &["Asia/Tashkent"]),
    row("Qyzylorda Standard Time", &["Asia/Qyzylorda"]),
    row("Ekaterinburg Standard Time", &["Asia/Yekaterinburg"]),
    row("Pakistan Standard Time", &["Asia/Karachi"]),
    row("India Standard Time", &["Asia/Kolkata"]),
    row("Sri Lanka Standard Time", &["Asia/Colombo"]),
    row("Nepal Standard Time", &["Asia/Kathmandu"]),
    row("Central Asia Standard Time", &["Asia/Almaty"]),
    row("Bangladesh Standard Time", &["Asia/Dhaka"]),
    row("Omsk Standard Time", &["Asia/Omsk"]),
    row("Myanmar Standard Time", &["Asia/Yangon"]),
    row("SE Asia Standard Time", &["Asia/Bangkok"]),
    row("Altai Standard Time", &["Asia/Barnaul"]),
    row("W. Mongolia Standard Time", &["Asia/Hovd"]),
    row("North Asia Standard Time", &["Asia/Krasnoyarsk"]),
    row("N. Central Asia Standard Time", &["Asia/Novosibirsk"]),
    row("Tomsk Standard Time", &["Asia/Tomsk"]),
    row("China Standard Time", &["Asia/Shanghai"]),
    row("North Asia East Standard Time", &["Asia/Irkutsk"]),
    row("Singapore Standard Time", &["Asia/Singapore"]),
    row("W. Australia Standard Time", &["Australia/Perth"]),
    row("Taipei Standard Time", &["Asia/Taipei"]),
    row("Ulaanbaatar Standard Time", &["Asia/Ulaanbaatar"]),
    row("Aus Central W. Standard Time", &["Australia/Eucla"]),
    row("Transbaikal Standard Time", &["Asia/Chita"]),
    row("Tokyo Standard Time", &["Asia/Tokyo"]),
    row("North Korea Standard Time", &["Asia/Pyongyang"]),
    row("Korea Standard Time", &["Asia/Seoul"]),
    row("Yakutsk Standard Time", &["Asia/Yakutsk"]),
    row("Cen. Australia Standard Time", &["Australia/Adelaide"]),
    row("AUS Central Standard Time", &["Australia/Darwin"]),
    row("E. Australia Standard Time", &["Australia/Brisbane"]),
    row("AUS Eastern Standard Time", &["Australia/Sydney", "Australia/Melbourne"]),
    row("West Pacific Standard Time", &["Pacific/Port_Moresby"]),
    row("Tasmania Standard Time", &["Australia/Hobart"]),
    row("Vladivostok Standard Time", &["Asia/Vladivostok"]),
    row("Lord Howe Standard Time", &["Australia/Lord_Howe"]),
    row("Bougainville Standard Time", &["Pacific/Bougainville"]),
    row("Russia Time Zone 10", &["Asia/Srednekolymsk"]),
    row("Magadan Standard Time", &["Asia/Magadan"]),
    row("Norfolk Standard Time", &["Pacific/Norfolk"]),
    row("Sakhalin Standard Time", &["Asia/Sakhalin"]),
    row("Central Pacific Standard Time", &["Pacific/Guadalcanal"]),
    row("Russia Time Zone 11", &["Asia/Kamchatka"]),
    row("New Zealand Standard Time", &["Pacific/Auckland"]),
    row("UTC+12", &["Etc/GMT-12"]),
    row("Fiji Standard Time", &["Pacific/Fiji"]),
    row("Chatham Islands Standard Time", &["Pacific/Chatham"]),
    row("UTC+13", &["Etc/GMT-13"]),
    row("Tonga Standard Time", &["Pacific/Tongatapu"]),
    row("Samoa Standard Time", &["Pacific/Apia"]),
    row("Line Islands Standard Time", &["Pacific/Kiritimati"]),
    // Display-label city names. Outlook localizes the `(UTC…)` prefix away
    // in some transports and leaves only the city list, so each city that
    // appears in a stock display label gets its own row for segment lookup.
    row("Eastern Time (US & Canada)", &["America/New_York"]),
    row("Central Time (US & Canada)", &["America/Chicago"]),
    row("Mountain Time (US & Canada)", &["America/Denver"]),
    row("Pacific Time (US & Canada)", &["America/Los_Angeles"]),
    row("Amsterdam", &["Europe/Amsterdam"]),
    row("Berlin", &["Europe/Berlin"]),
    row("Bern", &["Europe/Zurich"]),
    row("Rome", &["Europe/Rome"]),
    row("Stockholm", &["Europe/Stockholm"]),
    row("Vienna", &["Europe/Vienna"]),
    row("Brussels", &["Europe/Brussels"]),
    row("Copenhagen", &["Europe/Copenhagen"]),
    row("Madrid", &["Europe/Madrid"]),
    row("Paris", &["Europe/Paris"]),
    row("Belgrade", &["Europe/Belgrade"]),
    row("Bratislava", &["Europe/Bratislava"]),
    row("Budapest", &["Europe/Budapest"]),
    row("Ljubljana", &["Europe/Ljubljana"]),
    row("Prague", &["Europe/Prague"]),
    row("Sarajevo", &["Europe/Sarajevo"]),
    row("Skopje", &["Europe/Skopje"]),
    row("Warsaw", &["Europe/Warsaw"]),
    row("Zagreb", &["Europe/Zagreb"]),
    row("Helsinki", &["Europe/Helsinki"]),
    row("Kyiv", &["Europe/Kyiv"]),
    row("Riga", &["Europe/Riga"]),
    row("Sofia", &["Europe/Sofia"]),
    row("Tallinn", &["Europe/Tallinn"]),
    row("Vilnius", &["Europe/Vilnius"]),
    row("Athens", &["Europe/Athens"]),
    row("Bucharest", &["Europe/Bucharest"]),
    row("Dublin", &["Europe/Dublin"]),
    row("Edinburgh", &["Europe/London"]),
    row("Lisbon", &["Europe/Lisbon"]),
    row("London", &["Europe/London"]),
    row("Moscow", &["Europe/Moscow"]),
    row("St. Petersburg", &["Europe/Moscow"]),
    row("Chennai", &["Asia/Kolkata"]),
    row("Kolkata", &["Asia/Kolkata"]),
    row("Mumbai", &["Asia/Kolkata"]),
    row("New Delhi", &["Asia/Kolkata"]),
    row("Beijing", &["Asia/Shanghai"]),
    row("Chongqing", &["Asia/Shanghai"]),
    row("Hong Kong", &["Asia/Hong_Kong"]),
    row("Urumqi", &["Asia/Urumqi"]),
    row("Canberra", &["Australia/Sydney"]),
    row("Melbourne", &["Australia/Melbourne"]),
    row("Sydney", &["Australia/Sydney"]),
    row("Guadalajara", &["America/Mexico_City"]),
    row("Mexico City", &["America/Mexico_City"]),
    row("Monterrey", &["America/Monterrey"]),
    row("Brasilia", &["America/Sao_Paulo"]),
    row("Buenos Aires", &["America/Argentina/Buenos_Aires"]),
    row("Georgetown", &["America/Guyana"]),
    row("Abu Dhabi", &["Asia/Dubai"]),
    row("Muscat", &["Asia/Muscat"]),
    row("Islamabad", &["Asia/Karachi"]),
    row("Karachi", &["Asia/Karachi"]),
    row("Bangkok", &["Asia/Bangkok"]),
    row("Hanoi", &["Asia/Bangkok"]),
    row("Jakarta", &["Asia/Jakarta"]),
    row("Kuala Lumpur", &["Asia/Kuala_Lumpur"]),
    row("Singapore", &["Asia/Singapore"]),
    row("Perth", &["Australia/Perth"]),
    row("Taipei", &["Asia/Taipei"]),
    row("Osaka", &["Asia/Tokyo"]),
    row("Sapporo", &["Asia/Tokyo"]),
    row("Tokyo", &["Asia/Tokyo"]),
    row("Seoul", &["Asia/Seoul"]),
    row("Auckland", &["Pacific/Auckland"]),
    row("Wellington", &["Pacific/Auckland"]),
    row("Cairo", &["Africa/Cairo"]),
    row("Harare", &["Africa/Harare"]),
    row("Pretoria", &["Africa/Johannesburg"]),
    row("Nairobi", &["Africa/Nairobi"]),
];

/// Looks up a Windows label and returns the preferred IANA name.
///
/// Matching proceeds in order: exact label; case-insensitive
/// whitespace-collapsed label; the label with a leading `(UTC…)`/`(GMT…)`
/// parenthetical removed; each comma-separated segment of that stripped
/// label. The first hit wins.
#[must_use]
pub fn lookup(label: &str) -> Option<&'static str> {
    if let Some(name) = exact(label) {
        return Some(name);
    }
    if let Some(name) = folded(label) {
        return Some(name);
    }

    let stripped = strip_utc_prefix(label);
    if stripped != label {
        if let Some(name) = exact(stripped).or_else(|| folded(stripped)) {
            return Some(name);
        }
    }
    for segment in stripped.split(',') {
        let segment = segment.trim();
        if segment.is_empty() {
            continue;
        }
        if let Some(name) = exact(segment).or_else(|| folded(segment)) {
            return Some(name);
        }
    }
    None
}

fn exact(label: &str) -> Option<&'static str> {
    WINDOWS_ZONES
        .iter()
        .find(|zone| zone.label == label)
        .and_then(|zone| zone.iana.first().copied())
}

fn folded(label: &str) -> Option<&'static str> {
    let needle = fold(label);
    WINDOWS_ZONES
        .iter()
        .find(|zone| fold(zone.label) == needle)
        .and_then(|zone| zone.iana.first().copied())
}

/// Lowercases and collapses runs of whitespace to single spaces.
fn fold(label: &str) -> String {
    label
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Removes a leading `(UTC+01:00)` or `(GMT-08:00)` style parenthetical.
fn strip_utc_prefix(label: &str) -> &str {
    let trimmed = label.trim_start();
    if !trimmed.starts_with('(') {
        return label;
    }
    let upper = trimmed.to_ascii_uppercase();
    if !(upper.starts_with("(UTC") || upper.starts_with("(GMT")) {
        return label;
    }
    match trimmed.find(')') {
        Some(end) => trimmed[end + 1..].trim_start(),
        None => label,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_windows_id() {
        assert_eq!(lookup("W. Europe Standard Time"), Some("Europe/Berlin"));
        assert_eq!(lookup("Pacific Standard Time"), Some("America/Los_Angeles"));
    }

    #[test]
    fn case_and_whitespace_insensitive() {
        assert_eq!(lookup("w. europe  standard time"), Some("Europe/Berlin"));
        assert_eq!(lookup("EASTERN STANDARD TIME"), Some("America/New_York"));
    }

    #[test]
    fn display_label_with_utc_prefix() {
        assert_eq!(
            lookup("(UTC+01:00) Amsterdam, Berlin, Bern, Rome, Stockholm, Vienna"),
            Some("Europe/Amsterdam")
        );
        assert_eq!(
            lookup("(UTC-05:00) Eastern Time (US & Canada)"),
            Some("America/New_York")
        );
    }

    #[test]
    fn comma_segment_fallback() {
        assert_eq!(lookup("Somewhere, Berlin"), Some("Europe/Berlin"));
    }

    #[test]
    fn unknown_label() {
        assert_eq!(lookup("Middle Earth Standard Time"), None);
    }
}
