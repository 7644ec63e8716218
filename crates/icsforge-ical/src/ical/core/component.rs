//! iCalendar component types (RFC 5545 §3.4-3.6).

use super::ContentLine;

/// Component kinds produced by the encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    /// VCALENDAR wrapper component.
    Calendar,
    /// VEVENT component.
    Event,
    /// VTIMEZONE component.
    Timezone,
    /// VALARM component (nested within VEVENT).
    Alarm,
    /// STANDARD sub-component of VTIMEZONE.
    Standard,
    /// DAYLIGHT sub-component of VTIMEZONE.
    Daylight,
}

impl ComponentKind {
    /// Returns the string name for this component kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Calendar => "VCALENDAR",
            Self::Event => "VEVENT",
            Self::Timezone => "VTIMEZONE",
            Self::Alarm => "VALARM",
            Self::Standard => "STANDARD",
            Self::Daylight => "DAYLIGHT",
        }
    }
}

impl std::fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry inside a component, in output order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    Property(ContentLine),
    Component(Component),
}

/// An iCalendar component: a `BEGIN`/`END` envelope around ordered entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    pub kind: ComponentKind,
    pub entries: Vec<Entry>,
}

impl Component {
    /// Creates an empty component of the given kind.
    #[must_use]
    pub fn new(kind: ComponentKind) -> Self {
        Self {
            kind,
            entries: Vec::new(),
        }
    }

    /// Appends a property.
    pub fn add_property(&mut self, line: ContentLine) {
        self.entries.push(Entry::Property(line));
    }

    /// Appends a nested component.
    pub fn add_child(&mut self, child: Component) {
        self.entries.push(Entry::Component(child));
    }

    /// Returns the first property with the given name.
    #[must_use]
    pub fn get_property(&self, name: &str) -> Option<&ContentLine> {
        self.properties().find(|p| p.name.eq_ignore_ascii_case(name))
    }

    /// Iterates over direct properties.
    pub fn properties(&self) -> impl Iterator<Item = &ContentLine> {
        self.entries.iter().filter_map(|entry| match entry {
            Entry::Property(line) => Some(line),
            Entry::Component(_) => None,
        })
    }

    /// Iterates over direct sub-components.
    pub fn children(&self) -> impl Iterator<Item = &Component> {
        self.entries.iter().filter_map(|entry| match entry {
            Entry::Component(child) => Some(child),
            Entry::Property(_) => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entries_keep_insertion_order() {
        let mut event = Component::new(ComponentKind::Event);
        event.add_property(ContentLine::new("UID", "a"));
        event.add_child(Component::new(ComponentKind::Alarm));
        event.add_property(ContentLine::new("SEQUENCE", "1"));

        assert!(matches!(event.entries[1], Entry::Component(_)));
        assert_eq!(event.properties().count(), 2);
        assert_eq!(event.children().count(), 1);
        assert_eq!(event.get_property("sequence").map(|p| p.value.as_str()), Some("1"));
    }

    #[test]
    fn kind_names() {
        assert_eq!(ComponentKind::Calendar.to_string(), "VCALENDAR");
        assert_eq!(ComponentKind::Daylight.as_str(), "DAYLIGHT");
    }
}
