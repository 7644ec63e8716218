//! Static `VTIMEZONE` definitions for legacy clients.
//!
//! Only a handful of well-known zones are embedded. Their rules are the
//! current recurring transitions anchored in 1970; historical changes are
//! not represented.

use super::normalize_tzid;
use crate::ical::core::{Component, ComponentKind, ContentLine, names};

/// One `STANDARD` or `DAYLIGHT` observance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoneRule {
    pub kind: ComponentKind,
    pub name: &'static str,
    pub offset_from: &'static str,
    pub offset_to: &'static str,
    pub dtstart: &'static str,
    pub rrule: Option<&'static str>,
}

/// A zone from the static table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaticZone {
    pub tzid: &'static str,
    pub rules: &'static [ZoneRule],
}

const fn standard(
    name: &'static str,
    offset_from: &'static str,
    offset_to: &'static str,
    dtstart: &'static str,
    rrule: Option<&'static str>,
) -> ZoneRule {
    ZoneRule {
        kind: ComponentKind::Standard,
        name,
        offset_from,
        offset_to,
        dtstart,
        rrule,
    }
}

const fn daylight(
    name: &'static str,
    offset_from: &'static str,
    offset_to: &'static str,
    dtstart: &'static str,
    rrule: Option<&'static str>,
) -> ZoneRule {
    ZoneRule {
        kind: ComponentKind::Daylight,
        name,
        offset_from,
        offset_to,
        dtstart,
        rrule,
    }
}

const US_DST_START: Option<&str> = Some("FREQ=YEARLY;BYMONTH=3;BYDAY=2SU");
const US_DST_END: Option<&str> = Some("FREQ=YEARLY;BYMONTH=11;BYDAY=1SU");
const EU_DST_START: Option<&str> = Some("FREQ=YEARLY;BYMONTH=3;BYDAY=-1SU");
const EU_DST_END: Option<&str> = Some("FREQ=YEARLY;BYMONTH=10;BYDAY=-1SU");

static ZONES: &[StaticZone] = &[
    StaticZone {
        tzid: "UTC",
        rules: &[standard("UTC", "+0000", "+0000", "19700101T000000", None)],
    },
    StaticZone {
        tzid: "America/New_York",
        rules: &[
            daylight("EDT", "-0500", "-0400", "19700308T020000", US_DST_START),
            standard("EST", "-0400", "-0500", "19701101T020000", US_DST_END),
        ],
    },
    StaticZone {
        tzid: "America/Chicago",
        rules: &[
            daylight("CDT", "-0600", "-0500", "19700308T020000", US_DST_START),
            standard("CST", "-0500", "-0600", "19701101T020000", US_DST_END),
        ],
    },
    StaticZone {
        tzid: "America/Denver",
        rules: &[
            daylight("MDT", "-0700", "-0600", "19700308T020000", US_DST_START),
            standard("MST", "-0600", "-0700", "19701101T020000", US_DST_END),
        ],
    },
    StaticZone {
        tzid: "America/Los_Angeles",
        rules: &[
            daylight("PDT", "-0800", "-0700", "19700308T020000", US_DST_START),
            standard("PST", "-0700", "-0800", "19701101T020000", US_DST_END),
        ],
    },
    StaticZone {
        tzid: "Europe/London",
        rules: &[
            daylight("BST", "+0000", "+0100", "19700329T010000", EU_DST_START),
            standard("GMT", "+0100", "+0000", "19701025T020000", EU_DST_END),
        ],
    },
    StaticZone {
        tzid: "Europe/Berlin",
        rules: &[
            daylight("CEST", "+0100", "+0200", "19700329T020000", EU_DST_START),
            standard("CET", "+0200", "+0100", "19701025T030000", EU_DST_END),
        ],
    },
    StaticZone {
        tzid: "Europe/Paris",
        rules: &[
            daylight("CEST", "+0100", "+0200", "19700329T020000", EU_DST_START),
            standard("CET", "+0200", "+0100", "19701025T030000", EU_DST_END),
        ],
    },
    StaticZone {
        tzid: "Asia/Kolkata",
        rules: &[standard("IST", "+0530", "+0530", "19700101T000000", None)],
    },
    StaticZone {
        tzid: "Asia/Tokyo",
        rules: &[standard("JST", "+0900", "+0900", "19700101T000000", None)],
    },
    StaticZone {
        tzid: "Australia/Sydney",
        rules: &[
            standard(
                "AEST",
                "+1100",
                "+1000",
                "19700405T030000",
                Some("FREQ=YEARLY;BYMONTH=4;BYDAY=1SU"),
            ),
            daylight(
                "AEDT",
                "+1000",
                "+1100",
                "19701004T020000",
                Some("FREQ=YEARLY;BYMONTH=10;BYDAY=1SU"),
            ),
        ],
    },
];

/// ## Summary
/// Finds the static definition for `tzid`, trying the identifier as given
/// and then its normalized IANA form.
#[must_use]
pub fn lookup_static_zone(tzid: &str) -> Option<&'static StaticZone> {
    let exact = ZONES.iter().find(|zone| zone.tzid == tzid);
    exact.or_else(|| {
        let normalized = normalize_tzid(tzid);
        ZONES.iter().find(|zone| zone.tzid == normalized)
    })
}

impl StaticZone {
    /// ## Summary
    /// Builds the `VTIMEZONE` component, labelled with `tzid` so that it
    /// matches the `TZID` parameters written on event properties.
    #[must_use]
    pub fn to_component(&self, tzid: &str) -> Component {
        let mut timezone = Component::new(ComponentKind::Timezone);
        timezone.add_property(ContentLine::new(names::TZID, tzid));

        for rule in self.rules {
            let mut observance = Component::new(rule.kind);
            observance.add_property(ContentLine::new(names::TZOFFSETFROM, rule.offset_from));
            observance.add_property(ContentLine::new(names::TZOFFSETTO, rule.offset_to));
            observance.add_property(ContentLine::new(names::TZNAME, rule.name));
            observance.add_property(ContentLine::new(names::DTSTART, rule.dtstart));
            if let Some(rrule) = rule.rrule {
                observance.add_property(ContentLine::new(names::RRULE, rrule));
            }
            timezone.add_child(observance);
        }

        timezone
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_exact() {
        let zone = lookup_static_zone("Europe/Berlin").expect("embedded");
        assert_eq!(zone.tzid, "Europe/Berlin");
        assert_eq!(zone.rules.len(), 2);
    }

    #[test]
    fn lookup_via_alias() {
        let zone = lookup_static_zone("US/Eastern").expect("alias of New York");
        assert_eq!(zone.tzid, "America/New_York");
    }

    #[test]
    fn lookup_unknown() {
        assert!(lookup_static_zone("Pacific/Chatham").is_none());
        assert!(lookup_static_zone("Not/AZone").is_none());
    }

    #[test]
    fn component_keeps_caller_tzid() {
        let zone = lookup_static_zone("US/Eastern").expect("embedded");
        let component = zone.to_component("US/Eastern");
        assert_eq!(component.kind, ComponentKind::Timezone);
        assert_eq!(
            component.get_property("TZID").map(|p| p.value.as_str()),
            Some("US/Eastern")
        );
        let kinds: Vec<_> = component.children().map(|c| c.kind).collect();
        assert_eq!(kinds, [ComponentKind::Daylight, ComponentKind::Standard]);
    }

    #[test]
    fn fixed_zone_has_no_rrule() {
        let zone = lookup_static_zone("Asia/Tokyo").expect("embedded");
        let component = zone.to_component("Asia/Tokyo");
        let standard = component.children().next().expect("observance");
        assert!(standard.get_property("RRULE").is_none());
        assert_eq!(
            standard.get_property("TZOFFSETTO").map(|p| p.value.as_str()),
            Some("+0900")
        );
    }
}
