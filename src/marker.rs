use std::fmt::Write;

use crate::models::{Gender, Signal};
use crate::status::SignalStatus;

/// Marker shade on the map; one canonical set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerColor {
    Red,
    Orange,
    Green,
}

impl MarkerColor {
    pub fn label(&self) -> &'static str {
        match self {
            MarkerColor::Red => "red",
            MarkerColor::Orange => "orange",
            MarkerColor::Green => "green",
        }
    }
}

/// Pure map from derived status to shade: red for pending, orange once a
/// responder acknowledged, green when completed.
pub fn marker_color(status: SignalStatus) -> MarkerColor {
    match status {
        SignalStatus::Pending => MarkerColor::Red,
        SignalStatus::Acknowledged => MarkerColor::Orange,
        SignalStatus::Completed => MarkerColor::Green,
    }
}

pub fn gender_icon(gender: Gender) -> &'static str {
    match gender {
        Gender::Male => "♂",
        Gender::Female => "♀",
    }
}

/// One map marker with its expandable detail panel. The panel starts
/// collapsed and flips on every toggle; nothing persists across rebuilds.
#[derive(Debug, Clone)]
pub struct Marker {
    pub signal: Signal,
    expanded: bool,
}

impl Marker {
    pub fn new(signal: Signal) -> Self {
        Self {
            signal,
            expanded: false,
        }
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    pub fn toggle(&mut self) {
        self.expanded = !self.expanded;
    }

    pub fn color(&self) -> MarkerColor {
        marker_color(self.signal.status())
    }

    /// Collapsed: one glyph line. Expanded: glyph line plus the detail panel.
    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "● [{}] signal {} at ({:.4}, {:.4})",
            self.color().label(),
            self.signal.id,
            self.signal.location.latitude,
            self.signal.location.longitude
        );

        if self.expanded {
            out.push_str(&self.detail_panel());
        }

        out
    }

    fn detail_panel(&self) -> String {
        let pwid = &self.signal.pwid;
        let mut out = String::new();

        let _ = writeln!(out, "  {} {}", pwid.name, gender_icon(pwid.gender));
        let _ = writeln!(out, "  Medical Conditions");

        match pwid.medical_conditions.as_deref() {
            None | Some([]) => {
                let _ = writeln!(out, "    None");
            }
            Some(conditions) => {
                for condition in conditions {
                    let _ = writeln!(out, "    {condition}");
                }
            }
        }

        let _ = writeln!(out, "  Emergency Contacts");
        for contact in &pwid.emergency_contacts {
            let _ = writeln!(
                out,
                "    {} ({}) - {}",
                contact.name, contact.relationship, contact.phone_number
            );
        }

        let _ = writeln!(out, "  Location: {}", self.signal.location.address);
        if let (Some(name), Some(responder)) =
            (self.signal.responder_name(), self.signal.responder.as_ref())
        {
            let _ = writeln!(out, "  Responder: {} - {}", name, responder.phone_number);
        }
        let _ = writeln!(out, "  Map: {}", maps_link(&self.signal.location.address));
        let _ = writeln!(
            out,
            "  Actions: accept {id} | cancel {id}",
            id = self.signal.id
        );

        out
    }
}

/// Google Maps search link for a signal address, keyed on the postal segment
/// when the address carries one.
pub fn maps_link(address: &str) -> String {
    let query = address.split(", ").nth(1).unwrap_or(address);
    format!(
        "https://www.google.com/maps/search/?api=1&query={}&zoom=20",
        query.replace(' ', "+")
    )
}

/// Static-map provider URL with one colored marker per signal. The caller
/// passes the provider key from `DISTRESS_MAP_API_KEY`.
pub fn static_map_url(signals: &[Signal], api_key: &str) -> String {
    let mut url = String::from(
        "https://maps.googleapis.com/maps/api/staticmap?size=640x640&zoom=12",
    );

    for signal in signals {
        let _ = write!(
            url,
            "&markers=color:{}%7C{},{}",
            marker_color(signal.status()).label(),
            signal.location.latitude,
            signal.location.longitude
        );
    }

    let _ = write!(url, "&key={api_key}");
    url
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EmergencyContact, Location, Pwid};

    fn sample_signal(is_acknowledged: bool, is_completed: bool) -> Signal {
        Signal {
            id: 9,
            location: Location {
                latitude: 1.3521,
                longitude: 103.8198,
                address: "Bedok North, (S)460001".to_string(),
            },
            pwid: Pwid {
                name: "Tan Wei Ming".to_string(),
                gender: Gender::Female,
                medical_conditions: None,
                emergency_contacts: vec![EmergencyContact {
                    name: "Tan Mei Ling".to_string(),
                    phone_number: "+65 9123 4567".to_string(),
                    relationship: "Sister".to_string(),
                }],
            },
            responder: None,
            is_acknowledged,
            is_completed,
            created_at: None,
            acknowledged_at: None,
        }
    }

    #[test]
    fn color_follows_flag_precedence() {
        assert_eq!(
            marker_color(SignalStatus::derive(false, false)),
            MarkerColor::Red
        );
        assert_eq!(
            marker_color(SignalStatus::derive(true, false)),
            MarkerColor::Orange
        );
        assert_eq!(
            marker_color(SignalStatus::derive(false, true)),
            MarkerColor::Green
        );
        assert_eq!(
            marker_color(SignalStatus::derive(true, true)),
            MarkerColor::Green
        );
    }

    #[test]
    fn panel_starts_collapsed_and_flips_each_toggle() {
        let mut marker = Marker::new(sample_signal(false, false));
        assert!(!marker.is_expanded());
        marker.toggle();
        assert!(marker.is_expanded());
        marker.toggle();
        assert!(!marker.is_expanded());
    }

    #[test]
    fn collapsed_render_omits_the_panel() {
        let marker = Marker::new(sample_signal(false, false));
        let rendered = marker.render();
        assert!(rendered.contains("[red] signal 9"));
        assert!(!rendered.contains("Emergency Contacts"));
    }

    #[test]
    fn missing_conditions_render_as_none_placeholder() {
        let mut marker = Marker::new(sample_signal(false, false));
        marker.toggle();
        let rendered = marker.render();
        assert!(rendered.contains("Medical Conditions"));
        assert!(rendered.contains("    None"));
    }

    #[test]
    fn empty_conditions_render_as_none_placeholder() {
        let mut signal = sample_signal(false, false);
        signal.pwid.medical_conditions = Some(Vec::new());
        let mut marker = Marker::new(signal);
        marker.toggle();
        assert!(marker.render().contains("    None"));
    }

    #[test]
    fn expanded_panel_lists_contacts_and_address() {
        let mut marker = Marker::new(sample_signal(true, false));
        marker.toggle();
        let rendered = marker.render();
        assert!(rendered.contains("Tan Wei Ming ♀"));
        assert!(rendered.contains("Tan Mei Ling (Sister) - +65 9123 4567"));
        assert!(rendered.contains("Location: Bedok North, (S)460001"));
    }

    #[test]
    fn maps_link_targets_the_postal_segment() {
        let link = maps_link("Bedok North, (S)460001");
        assert_eq!(
            link,
            "https://www.google.com/maps/search/?api=1&query=(S)460001&zoom=20"
        );
    }

    #[test]
    fn static_map_url_carries_one_marker_per_signal() {
        let signals = vec![sample_signal(false, false), sample_signal(false, true)];
        let url = static_map_url(&signals, "test-key");
        assert_eq!(url.matches("&markers=").count(), 2);
        assert!(url.contains("color:red"));
        assert!(url.contains("color:green"));
        assert!(url.ends_with("&key=test-key"));
    }
}
