//! Per-run bookkeeping of which functions have been classified.

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};

use super::{check_function, FunctionReport};
use crate::classification::ClassificationTable;
use crate::core::{FunctionId, PurityLevel};
use crate::diagnostics::DiagnosticSink;
use crate::errors::Result;
use crate::ir::{DeclarationKey, FunctionDecl, SourceFile};

/// Where a declaration is in the current run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum FunctionState {
    Unvisited,
    /// Slot claimed; the body is being classified
    Visiting,
    /// Declaration without a body
    Skipped,
    Classified { level: PurityLevel },
    /// Analysis aborted on an internal consistency failure
    Failed { reason: String },
}

/// One analysis run over any number of declarations.
///
/// Each declaration moves from `Unvisited` to a terminal state exactly once;
/// asking again returns nothing new. Declarations are keyed by position, so
/// overloads sharing a qualified name are each classified.
pub struct AnalysisSession<'t> {
    table: &'t ClassificationTable,
    states: DashMap<DeclarationKey, FunctionState>,
}

impl<'t> AnalysisSession<'t> {
    pub fn new(table: &'t ClassificationTable) -> Self {
        Self {
            table,
            states: DashMap::new(),
        }
    }

    pub fn table(&self) -> &ClassificationTable {
        self.table
    }

    pub fn state(&self, key: DeclarationKey) -> FunctionState {
        self.states
            .get(&key)
            .map(|state| state.clone())
            .unwrap_or(FunctionState::Unvisited)
    }

    /// Inferred level of a classified declaration
    pub fn classified_level(&self, key: DeclarationKey) -> Option<PurityLevel> {
        match self.state(key) {
            FunctionState::Classified { level } => Some(level),
            _ => None,
        }
    }

    pub fn visited_count(&self) -> usize {
        self.states.len()
    }

    /// Classify `decl` unless this session already claimed `key`.
    ///
    /// Returns the report only on the first, classifying visit. The map
    /// shard is locked only while claiming the slot and while recording the
    /// outcome, never during the body walk.
    pub fn visit(
        &self,
        key: DeclarationKey,
        file: &SourceFile,
        decl: &FunctionDecl,
        sink: &dyn DiagnosticSink,
    ) -> Result<Option<FunctionReport>> {
        match self.states.entry(key) {
            Entry::Occupied(_) => {
                log::trace!("{} ({}) already visited in this session", decl.id, key);
                return Ok(None);
            }
            Entry::Vacant(vacant) => {
                vacant.insert(FunctionState::Visiting);
            }
        }

        let outcome = check_function(self.table, file, decl, sink);
        let state = match &outcome {
            Ok(Some(report)) => FunctionState::Classified {
                level: report.inferred,
            },
            Ok(None) => FunctionState::Skipped,
            Err(e) => FunctionState::Failed {
                reason: e.to_string(),
            },
        };
        self.states.insert(key, state);
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::CollectingSink;
    use crate::testkit::{call, const_int, function, get, local_var, ret, top_level_fn};

    #[test]
    fn test_second_visit_reports_nothing() {
        let table = ClassificationTable::new();
        let session = AnalysisSession::new(&table);
        let sink = CollectingSink::new();
        let decl = function("s.f")
            .pure()
            .body(call(top_level_fn("untrustable"), None, vec![]))
            .build();
        let file = SourceFile::new("s.kt");

        let key = DeclarationKey::new(0, 0);

        let first = session.visit(key, &file, &decl, &sink).unwrap();
        assert!(first.is_some());
        assert_eq!(sink.len(), 1);

        let second = session.visit(key, &file, &decl, &sink).unwrap();
        assert!(second.is_none());
        assert_eq!(sink.len(), 1);
        assert_eq!(
            session.state(key),
            FunctionState::Classified {
                level: PurityLevel::None
            }
        );
    }

    #[test]
    fn test_states() {
        let table = ClassificationTable::new();
        let session = AnalysisSession::new(&table);
        let sink = CollectingSink::new();
        let file = SourceFile::new("s.kt");
        let abstract_fn = function("s.Shape.area").build();
        let external = local_var("external", "s.main", true);
        let reader = function("s.main.read").readonly().body(ret(get(&external))).build();

        let (abstract_key, reader_key) = (DeclarationKey::new(0, 0), DeclarationKey::new(0, 1));

        assert_eq!(session.state(reader_key), FunctionState::Unvisited);
        session.visit(abstract_key, &file, &abstract_fn, &sink).unwrap();
        session.visit(reader_key, &file, &reader, &sink).unwrap();

        assert_eq!(session.state(abstract_key), FunctionState::Skipped);
        assert_eq!(session.classified_level(reader_key), Some(PurityLevel::Readonly));
        assert_eq!(session.visited_count(), 2);
        assert!(sink.is_empty());
    }

    #[test]
    fn test_overloads_sharing_an_id_are_each_classified() {
        let table = ClassificationTable::new();
        let session = AnalysisSession::new(&table);
        let sink = CollectingSink::new();
        let file = SourceFile::new("s.kt");
        let first = function("s.f").pure().param("a").body(ret(const_int(1))).build();
        let second = function("s.f")
            .pure()
            .param("s")
            .body(call(top_level_fn("launch"), None, vec![]))
            .build();

        let first_report = session
            .visit(DeclarationKey::new(0, 0), &file, &first, &sink)
            .unwrap();
        let second_report = session
            .visit(DeclarationKey::new(0, 1), &file, &second, &sink)
            .unwrap();

        assert_eq!(first_report.unwrap().inferred, PurityLevel::Pure);
        assert_eq!(second_report.unwrap().inferred, PurityLevel::None);
        assert_eq!(sink.len(), 1);
        assert_eq!(session.visited_count(), 2);
    }
}
