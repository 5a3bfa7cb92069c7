//! Snapshot transactions over the document.
//!
//! Every user-facing command runs inside exactly one transaction. The
//! guard snapshots the document on open; dropping it without calling
//! [`Transaction::commit`] restores the snapshot, so a failed or
//! cancelled command never leaves a partial mutation committed.

use super::Document;
use super::document::DocumentState;

/// An open transaction on a document.
///
/// Obtained from [`Document::transaction`]. All mutation during the
/// transaction goes through [`Transaction::document`].
#[derive(Debug)]
pub struct Transaction<'a> {
    doc: &'a mut Document,
    snapshot: DocumentState,
    name: String,
    committed: bool,
}

impl Document {
    /// Opens a named transaction.
    pub fn transaction(&mut self, name: impl Into<String>) -> Transaction<'_> {
        let snapshot = self.state.clone();
        Transaction {
            doc: self,
            snapshot,
            name: name.into(),
            committed: false,
        }
    }
}

impl Transaction<'_> {
    /// The document under transaction.
    pub fn document(&mut self) -> &mut Document {
        self.doc
    }

    /// Commits the transaction, keeping all mutations.
    pub fn commit(mut self) {
        self.committed = true;
        tracing::debug!(name = %self.name, "transaction committed");
    }
}

impl Drop for Transaction<'_> {
    fn drop(&mut self) {
        if !self.committed {
            self.doc.state = std::mem::take(&mut self.snapshot);
            tracing::warn!(name = %self.name, "transaction rolled back");
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::geometry::{Line3, Point3};
    use crate::host::{Category, Document, Domain, Profile};

    fn add_pipe(doc: &mut Document) {
        doc.add_segment(
            Category::Pipe,
            Domain::Piping,
            Profile::Round { radius: 0.25 },
            Line3::new(Point3::ORIGIN, Point3::new(10.0, 0.0, 0.0)),
        )
        .unwrap();
    }

    #[test]
    fn drop_without_commit_rolls_back() {
        let mut doc = Document::new();
        add_pipe(&mut doc);

        {
            let mut tx = doc.transaction("add another");
            add_pipe(tx.document());
            assert_eq!(tx.document().len(), 2);
        }

        assert_eq!(doc.len(), 1);
    }

    #[test]
    fn commit_keeps_mutations() {
        let mut doc = Document::new();

        let mut tx = doc.transaction("add pipe");
        add_pipe(tx.document());
        tx.commit();

        assert_eq!(doc.len(), 1);
    }

    #[test]
    fn rollback_restores_ids_exactly() {
        let mut doc = Document::new();
        add_pipe(&mut doc);
        let before: Vec<_> = doc.elements().map(|e| e.id).collect();

        {
            let mut tx = doc.transaction("abandoned");
            add_pipe(tx.document());
            add_pipe(tx.document());
        }

        let after: Vec<_> = doc.elements().map(|e| e.id).collect();
        assert_eq!(before, after);

        // Id allocation also rewinds, so a later element reuses the id
        // the abandoned transaction held.
        add_pipe(&mut doc);
        assert_eq!(doc.len(), 2);
    }
}
