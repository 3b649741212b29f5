use std::fmt::Write;

use crate::api::SignalGateway;
use crate::marker::Marker;
use crate::models::Signal;
use crate::status::compare_labels;

/// One rendered table row. Status is derived at row-build time, never stored
/// on the signal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub id: i64,
    pub pwid: String,
    pub responder: String,
    pub address: String,
    pub status: String,
}

/// Owns the fetched signal collection and the table-sort direction. The
/// collection is replaced wholesale on load; nothing mutates it in place.
pub struct Dashboard {
    signals: Vec<Signal>,
    markers: Vec<Marker>,
    ascending: bool,
}

impl Dashboard {
    pub fn new() -> Self {
        Self {
            signals: Vec::new(),
            markers: Vec::new(),
            ascending: false,
        }
    }

    /// Single fetch on load. On transport failure the error propagates and
    /// the collection stays empty; the dashboard remains usable.
    pub async fn load(&mut self, gateway: &SignalGateway) -> anyhow::Result<()> {
        let signals = gateway.list_signals().await?;
        self.set_signals(signals);
        Ok(())
    }

    pub fn set_signals(&mut self, signals: Vec<Signal>) {
        self.markers = signals.iter().cloned().map(Marker::new).collect();
        self.signals = signals;
    }

    pub fn signals(&self) -> &[Signal] {
        &self.signals
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn is_ascending(&self) -> bool {
        self.ascending
    }

    pub fn find_signal(&self, id: i64) -> Option<&Signal> {
        self.signals.iter().find(|signal| signal.id == id)
    }

    /// Sorts by status label (lexicographic) in the direction of the current
    /// flag, then flips it: the first activation sorts descending.
    pub fn toggle_sort(&mut self) {
        self.sort_by_status(self.ascending);
        self.ascending = !self.ascending;
    }

    /// Stable sort on the status label, so rows with equal status keep their
    /// server order.
    pub fn sort_by_status(&mut self, ascending: bool) {
        self.signals.sort_by(|a, b| {
            let ordering = compare_labels(a.status(), b.status());
            if ascending {
                ordering
            } else {
                ordering.reverse()
            }
        });
    }

    pub fn table_rows(&self) -> Vec<TableRow> {
        self.signals
            .iter()
            .map(|signal| TableRow {
                id: signal.id,
                pwid: signal.pwid.name.clone(),
                responder: signal
                    .responder_name()
                    .unwrap_or("None")
                    .to_string(),
                address: signal.location.address.clone(),
                status: signal.status().to_string(),
            })
            .collect()
    }

    pub fn render_table(&self) -> String {
        let rows = self.table_rows();
        let mut out = String::new();

        let _ = writeln!(
            out,
            "{:<6} {:<20} {:<20} {:<32} {:<12}",
            "ID", "PWID", "Responder", "Location", "Status"
        );

        for row in rows {
            let _ = writeln!(
                out,
                "{:<6} {:<20} {:<20} {:<32} {:<12}",
                row.id, row.pwid, row.responder, row.address, row.status
            );
        }

        out
    }

    pub fn render_markers(&self) -> String {
        self.markers.iter().map(Marker::render).collect()
    }
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new()
    }
}
