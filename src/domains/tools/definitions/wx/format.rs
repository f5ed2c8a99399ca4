//! Response formatters.
//!
//! Pure functions turning upstream payloads into stable text blocks.

use super::models::{
    AirportRecord, GAirmetPayload, HazardAdvisoryRecord, RouteBriefing, RunwayEntry,
};

/// Marker for a missing airport or briefing field.
pub const NOT_AVAILABLE: &str = "Not available";

/// Marker for a missing G-AIRMET field.
pub const NOT_SPECIFIED: &str = "Not specified";

/// Line for a runway entry with nothing usable in it.
const UNKNOWN_RUNWAY: &str = "Unknown runway format";

/// Trimmed raw text, or `None` when nothing is left.
pub fn non_blank(text: &str) -> Option<&str> {
    let text = text.trim();
    (!text.is_empty()).then_some(text)
}

/// Render one runway entry.
pub fn format_runway(entry: &RunwayEntry) -> String {
    match entry {
        RunwayEntry::Text(text) => text.trim().to_string(),
        RunwayEntry::Record(record) => {
            let (length, width) = record.dimensions();
            let mut parts: Vec<String> = Vec::new();
            if let Some(id) = &record.id {
                parts.push(id.clone());
            }
            match (length, width) {
                (Some(l), Some(w)) => parts.push(format!("({} ft x {} ft)", l, w)),
                (Some(l), None) => parts.push(format!("({} ft)", l)),
                (None, Some(w)) => parts.push(format!("({} ft wide)", w)),
                (None, None) => {}
            }
            if let Some(surface) = &record.surface {
                parts.push(surface.clone());
            }
            match non_blank(&parts.join(" ")) {
                Some(line) => line.to_string(),
                None => UNKNOWN_RUNWAY.to_string(),
            }
        }
        RunwayEntry::Other(_) => UNKNOWN_RUNWAY.to_string(),
    }
}

/// Render a runway list, one entry per line.
pub fn format_runways(runways: Option<&[RunwayEntry]>) -> String {
    match runways {
        Some(list) if !list.is_empty() => list
            .iter()
            .map(format_runway)
            .collect::<Vec<_>>()
            .join("\n"),
        _ => "None listed".to_string(),
    }
}

fn text_or_na(value: Option<&str>) -> &str {
    value.and_then(non_blank).unwrap_or(NOT_AVAILABLE)
}

fn number_or_na(value: Option<f64>, unit: &str) -> String {
    match value {
        Some(v) => format!("{}{}", v, unit),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Render the airport information block.
pub fn format_airport_info(code: &str, airport: &AirportRecord) -> String {
    format!(
        "Airport Information for {code}\n\
         ICAO: {icao}\n\
         Name: {name}\n\
         City: {city}\n\
         State: {state}\n\
         Country: {country}\n\
         Latitude: {lat}\n\
         Longitude: {lon}\n\
         Elevation: {elev}\n\
         Runways:\n{runways}",
        code = code,
        icao = text_or_na(airport.identifier.as_deref()),
        name = text_or_na(airport.name.as_deref()),
        city = text_or_na(airport.city.as_deref()),
        state = text_or_na(airport.state.as_deref()),
        country = text_or_na(airport.country.as_deref()),
        lat = number_or_na(airport.latitude, ""),
        lon = number_or_na(airport.longitude, ""),
        elev = number_or_na(airport.elevation, " ft"),
        runways = format_runways(airport.runways.as_deref()),
    )
}

fn format_advisory(index: usize, item: &HazardAdvisoryRecord) -> String {
    let field = |v: &Option<String>| -> String {
        v.as_deref()
            .and_then(non_blank)
            .unwrap_or(NOT_SPECIFIED)
            .to_string()
    };
    format!(
        "G-AIRMET #{}\nType: {}\nHazard: {}\nValid: {}\nArea: {}",
        index,
        field(&item.advisory_type),
        field(&item.hazard),
        field(&item.valid),
        field(&item.area),
    )
}

/// Render a G-AIRMET payload. `None` means there is nothing to show.
pub fn format_gairmets(payload: &GAirmetPayload) -> Option<String> {
    match payload {
        GAirmetPayload::Empty => None,
        GAirmetPayload::Text(text) => non_blank(text).map(str::to_string),
        GAirmetPayload::Items(items) if items.is_empty() => None,
        GAirmetPayload::Items(items) => Some(
            items
                .iter()
                .enumerate()
                .map(|(i, item)| format_advisory(i + 1, item))
                .collect::<Vec<_>>()
                .join("\n\n"),
        ),
        GAirmetPayload::Other(value) => {
            Some(serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string()))
        }
    }
}

/// Render a route briefing.
pub fn format_route_briefing(briefing: &RouteBriefing) -> String {
    let section = |text: &str| text_or_na(Some(text)).to_string();
    let pireps = non_blank(&briefing.enroute_pireps).unwrap_or("No PIREPs found en-route");

    format!(
        "ROUTE WEATHER BRIEFING: {dep} to {dest}\n\
         Distance: ~{dist} nm\n\
         Midpoint: {mid_lat:.4}, {mid_lon:.4}\n\
         \n\
         === DEPARTURE: {dep} ===\n\
         METAR:\n{dep_metar}\n\
         \n\
         TAF:\n{dep_taf}\n\
         \n\
         === DESTINATION: {dest} ===\n\
         METAR:\n{dest_metar}\n\
         \n\
         TAF:\n{dest_taf}\n\
         \n\
         === EN-ROUTE PIREPs (within {radius} nm of midpoint) ===\n\
         {pireps}",
        dep = briefing.departure,
        dest = briefing.destination,
        dist = briefing.distance_nm.round(),
        mid_lat = briefing.midpoint.0,
        mid_lon = briefing.midpoint.1,
        dep_metar = section(&briefing.departure_metar),
        dep_taf = section(&briefing.departure_taf),
        dest_metar = section(&briefing.destination_metar),
        dest_taf = section(&briefing.destination_taf),
        radius = briefing.search_radius_nm,
        pireps = pireps,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::definitions::wx::models::RunwayRecord;
    use serde_json::json;

    #[test]
    fn test_runways_empty_or_absent() {
        assert_eq!(format_runways(None), "None listed");
        assert_eq!(format_runways(Some(&[][..])), "None listed");
    }

    #[test]
    fn test_runway_strings_are_trimmed_and_stable() {
        let runways = vec![
            RunwayEntry::Text(" 04L/22R ".to_string()),
            RunwayEntry::Text("13R/31L".to_string()),
        ];
        let once = format_runways(Some(runways.as_slice()));
        assert_eq!(once, "04L/22R\n13R/31L");

        let again: Vec<RunwayEntry> = once
            .lines()
            .map(|l| RunwayEntry::Text(l.to_string()))
            .collect();
        assert_eq!(format_runways(Some(again.as_slice())), once);
    }

    #[test]
    fn test_runway_record_full_and_partial() {
        let full = RunwayEntry::Record(RunwayRecord {
            id: Some("09/27".to_string()),
            length: Some("10000".to_string()),
            width: Some("150".to_string()),
            surface: Some("ASPH".to_string()),
            dimension: None,
        });
        assert_eq!(format_runway(&full), "09/27 (10000 ft x 150 ft) ASPH");

        let id_only = RunwayEntry::Record(RunwayRecord {
            id: Some("18".to_string()),
            ..Default::default()
        });
        assert_eq!(format_runway(&id_only), "18");

        let surface_only = RunwayEntry::Record(RunwayRecord {
            surface: Some("TURF".to_string()),
            ..Default::default()
        });
        assert_eq!(format_runway(&surface_only), "TURF");
    }

    #[test]
    fn test_malformed_runway_degrades_per_element() {
        let runways = vec![
            RunwayEntry::Text("04/22".to_string()),
            RunwayEntry::from(json!(12)),
            RunwayEntry::from(json!([1, 2])),
        ];
        assert_eq!(
            format_runways(Some(runways.as_slice())),
            "04/22\nUnknown runway format\nUnknown runway format"
        );
    }

    #[test]
    fn test_empty_runway_record_is_never_blank() {
        assert_eq!(format_runway(&RunwayEntry::from(json!({}))), "Unknown runway format");
        assert_eq!(
            format_runway(&RunwayEntry::from(json!({"id": "  "}))),
            "Unknown runway format"
        );

        let runways = vec![RunwayEntry::from(json!({})), RunwayEntry::Text("18/36".to_string())];
        assert_eq!(
            format_runways(Some(runways.as_slice())),
            "Unknown runway format\n18/36"
        );
    }

    #[test]
    fn test_airport_info_marks_missing_fields() {
        let airport = AirportRecord {
            identifier: Some("KXYZ".to_string()),
            name: Some("".to_string()),
            latitude: Some(40.5),
            ..Default::default()
        };
        let text = format_airport_info("KXYZ", &airport);
        assert!(text.starts_with("Airport Information for KXYZ"));
        assert!(text.contains("ICAO: KXYZ"));
        assert!(text.contains("Name: Not available"));
        assert!(text.contains("City: Not available"));
        assert!(text.contains("Latitude: 40.5"));
        assert!(text.contains("Longitude: Not available"));
        assert!(text.contains("Elevation: Not available"));
        assert!(text.ends_with("Runways:\nNone listed"));
    }

    #[test]
    fn test_gairmet_items_are_numbered() {
        let payload = GAirmetPayload::from(json!([
            {"type": "SIERRA", "hazard": "IFR", "validTime": "2024-01-01T03:00:00Z", "area": "NE US"},
            {"hazard": "MT_OBSC"}
        ]));
        let text = format_gairmets(&payload).unwrap();

        assert!(text.contains("G-AIRMET #1\nType: SIERRA\nHazard: IFR"));
        assert!(text.contains("Valid: 2024-01-01T03:00:00Z\nArea: NE US"));
        assert!(text.contains(
            "G-AIRMET #2\nType: Not specified\nHazard: MT_OBSC\nValid: Not specified\nArea: Not specified"
        ));
    }

    #[test]
    fn test_gairmet_text_is_trimmed() {
        let payload = GAirmetPayload::Text("  GAIRMET SIERRA ...\n".to_string());
        assert_eq!(format_gairmets(&payload).as_deref(), Some("GAIRMET SIERRA ..."));
    }

    #[test]
    fn test_gairmet_empty_shapes() {
        assert_eq!(format_gairmets(&GAirmetPayload::Empty), None);
        assert_eq!(format_gairmets(&GAirmetPayload::Items(vec![])), None);
        assert_eq!(format_gairmets(&GAirmetPayload::Text("   ".to_string())), None);
    }

    #[test]
    fn test_gairmet_other_is_pretty_printed() {
        let payload = GAirmetPayload::from(json!({"type": "FeatureCollection"}));
        assert_eq!(
            format_gairmets(&payload).unwrap(),
            "{\n  \"type\": \"FeatureCollection\"\n}"
        );
    }

    #[test]
    fn test_route_briefing_fallbacks() {
        let briefing = RouteBriefing {
            departure: "KBOS".to_string(),
            destination: "KPHL".to_string(),
            distance_nm: 242.8,
            midpoint: (41.1, -73.25),
            departure_metar: "KBOS 011254Z 27010KT".to_string(),
            departure_taf: String::new(),
            destination_metar: "KPHL 011254Z 25008KT".to_string(),
            destination_taf: "  ".to_string(),
            search_radius_nm: 81,
            enroute_pireps: String::new(),
        };
        let text = format_route_briefing(&briefing);

        assert!(text.contains("KBOS to KPHL"));
        assert!(text.contains("Distance: ~243 nm"));
        assert!(text.contains("Midpoint: 41.1000, -73.2500"));
        assert!(text.contains("TAF:\nNot available"));
        assert!(text.contains("within 81 nm of midpoint"));
        assert!(text.ends_with("No PIREPs found en-route"));
    }
}
