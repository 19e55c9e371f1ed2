use crate::catalog::store::CaseCatalog;
use crate::core::case::Case;
use crate::core::clue::Clue;
use crate::core::session::{Session, SessionError};
use crate::core::types::CaseId;

/// Drives clue and hint reveals for sessions against one catalog.
///
/// The controller owns the progression rules; the [`Session`] only records
/// what happened. Clues come back borrowed from the catalog, so a host can
/// keep displaying one while it keeps mutating the session.
pub struct ClueRevealController<'a> {
    catalog: &'a CaseCatalog,
}

impl<'a> ClueRevealController<'a> {
    pub fn new(catalog: &'a CaseCatalog) -> Self {
        Self { catalog }
    }

    /// Start a new session against a case.
    ///
    /// The session comes back in progress with clue 1 already revealed; the
    /// first clue is the free entry point of every drill.
    ///
    /// # Errors
    ///
    /// [`SessionError::CaseNotFound`] for an unknown case id.
    pub fn start(&self, case_id: &CaseId) -> Result<Session, SessionError> {
        let case = self.case(case_id)?;

        let mut session = Session::new(case.id.clone());
        session.start()?;
        session.record_reveal(1)?;
        Ok(session)
    }

    /// Reveal the next clue in significance order.
    ///
    /// Clues cannot be skipped or re-revealed; the next clue is always the
    /// one after the highest revealed so far.
    ///
    /// # Errors
    ///
    /// `InvalidState` if the session is not in progress,
    /// [`SessionError::AllCluesRevealed`] once the case is exhausted.
    pub fn reveal_next(&self, session: &mut Session) -> Result<&'a Clue, SessionError> {
        session.ensure_in_progress()?;
        let case = self.case(session.case_id())?;

        // Reveals are strictly sequential, so the revealed set is 1..=k
        let next_id = session.revealed_clue_ids().len() as u32 + 1;
        let Some(clue) = case.clue(next_id) else {
            return Err(SessionError::AllCluesRevealed {
                total: case.clue_count(),
            });
        };

        session.record_reveal(next_id)?;
        Ok(clue)
    }

    /// Reveal the hint attached to an already-revealed clue.
    ///
    /// Asking again for a hint that was already taken succeeds and returns
    /// the same text without billing it twice.
    ///
    /// # Errors
    ///
    /// `InvalidState` if the session is not in progress,
    /// [`SessionError::UnknownClue`] for an id outside the case,
    /// [`SessionError::ClueNotYetRevealed`] if the clue is still hidden, and
    /// [`SessionError::NoHintAvailable`] if the clue carries no hint.
    pub fn reveal_hint(&self, session: &mut Session, clue_id: u32) -> Result<&'a str, SessionError> {
        session.ensure_in_progress()?;
        let case = self.case(session.case_id())?;

        let Some(clue) = case.clue(clue_id) else {
            return Err(SessionError::UnknownClue {
                clue_id,
                total: case.clue_count(),
            });
        };

        // Reveal check comes before the hint check so an error never leaks
        // whether a still-hidden clue has a hint attached.
        if !session.revealed_clue_ids().contains(&clue_id) {
            return Err(SessionError::ClueNotYetRevealed { clue_id });
        }

        let Some(hint) = clue.hint.as_deref() else {
            return Err(SessionError::NoHintAvailable { clue_id });
        };

        session.record_hint(clue_id)?;
        Ok(hint)
    }

    /// The clues a session has revealed so far, in reveal order.
    ///
    /// Works in any session state; reviewing the board after an attempt is
    /// finalized is read-only.
    ///
    /// # Errors
    ///
    /// [`SessionError::CaseNotFound`] if the session references a case this
    /// catalog does not have.
    pub fn revealed_clues(&self, session: &Session) -> Result<Vec<&'a Clue>, SessionError> {
        let case = self.case(session.case_id())?;
        Ok(session
            .revealed_clue_ids()
            .iter()
            .filter_map(|&id| case.clue(id))
            .collect())
    }

    fn case(&self, case_id: &CaseId) -> Result<&'a Case, SessionError> {
        self.catalog
            .get(case_id)
            .map_err(|_| SessionError::CaseNotFound(case_id.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::case::Solution;
    use crate::core::types::{ClueKind, Difficulty, SessionStatus};

    fn test_catalog() -> CaseCatalog {
        let solution = Solution::new(
            "leaked connections exhausted the pool",
            vec!["connection pool".to_string()],
            "roll back on early return",
        )
        .unwrap();

        let case = Case::new("pool-leak", "Checkout stalls", Difficulty::Mid, "database", solution)
            .with_clues(vec![
                Clue::new(1, ClueKind::Testimony, "checkout timing out"),
                Clue::new(2, ClueKind::Logs, "PoolTimeout 30000ms").with_hint("what is 30s?"),
                Clue::new(3, ClueKind::Metrics, "pool flat at 50"),
            ]);

        CaseCatalog::from_cases(vec![case]).unwrap()
    }

    #[test]
    fn test_start_reveals_first_clue() {
        let catalog = test_catalog();
        let controller = ClueRevealController::new(&catalog);

        let session = controller.start(&CaseId::new("pool-leak")).unwrap();
        assert_eq!(session.status(), SessionStatus::InProgress);
        assert!(session.revealed_clue_ids().contains(&1));
        assert_eq!(session.revealed_clue_ids().len(), 1);
        assert_eq!(session.billable_reveals(), 0);
    }

    #[test]
    fn test_start_unknown_case() {
        let catalog = test_catalog();
        let controller = ClueRevealController::new(&catalog);

        let err = controller.start(&CaseId::new("no-such-case")).unwrap_err();
        assert!(matches!(err, SessionError::CaseNotFound(_)));
    }

    #[test]
    fn test_reveal_next_walks_in_order_then_exhausts() {
        let catalog = test_catalog();
        let controller = ClueRevealController::new(&catalog);
        let mut session = controller.start(&CaseId::new("pool-leak")).unwrap();

        let clue = controller.reveal_next(&mut session).unwrap();
        assert_eq!(clue.id, 2);
        let clue = controller.reveal_next(&mut session).unwrap();
        assert_eq!(clue.id, 3);

        let err = controller.reveal_next(&mut session).unwrap_err();
        assert!(matches!(err, SessionError::AllCluesRevealed { total: 3 }));
        // A failed reveal changes nothing
        assert_eq!(session.revealed_clue_ids().len(), 3);
    }

    #[test]
    fn test_reveal_rejected_after_submission() {
        let catalog = test_catalog();
        let controller = ClueRevealController::new(&catalog);
        let mut session = controller.start(&CaseId::new("pool-leak")).unwrap();

        session.mark_submitted().unwrap();
        assert!(matches!(
            controller.reveal_next(&mut session),
            Err(SessionError::InvalidState { .. })
        ));
        assert!(matches!(
            controller.reveal_hint(&mut session, 1),
            Err(SessionError::InvalidState { .. })
        ));
    }

    #[test]
    fn test_hint_requires_reveal_first() {
        let catalog = test_catalog();
        let controller = ClueRevealController::new(&catalog);
        let mut session = controller.start(&CaseId::new("pool-leak")).unwrap();

        // Clue 2 exists but is still hidden; its hint stays unreachable
        let err = controller.reveal_hint(&mut session, 2).unwrap_err();
        assert!(matches!(err, SessionError::ClueNotYetRevealed { clue_id: 2 }));

        controller.reveal_next(&mut session).unwrap();
        let hint = controller.reveal_hint(&mut session, 2).unwrap();
        assert_eq!(hint, "what is 30s?");
        assert!(session.hints_used().contains(&2));
    }

    #[test]
    fn test_hint_unknown_clue_id() {
        let catalog = test_catalog();
        let controller = ClueRevealController::new(&catalog);
        let mut session = controller.start(&CaseId::new("pool-leak")).unwrap();

        let err = controller.reveal_hint(&mut session, 9).unwrap_err();
        assert!(matches!(err, SessionError::UnknownClue { clue_id: 9, total: 3 }));
        let err = controller.reveal_hint(&mut session, 0).unwrap_err();
        assert!(matches!(err, SessionError::UnknownClue { clue_id: 0, .. }));
    }

    #[test]
    fn test_hint_on_hintless_clue() {
        let catalog = test_catalog();
        let controller = ClueRevealController::new(&catalog);
        let mut session = controller.start(&CaseId::new("pool-leak")).unwrap();

        // Clue 1 is revealed but has no hint
        let err = controller.reveal_hint(&mut session, 1).unwrap_err();
        assert!(matches!(err, SessionError::NoHintAvailable { clue_id: 1 }));
        assert!(session.hints_used().is_empty());
    }

    #[test]
    fn test_hint_reread_not_billed_twice() {
        let catalog = test_catalog();
        let controller = ClueRevealController::new(&catalog);
        let mut session = controller.start(&CaseId::new("pool-leak")).unwrap();

        controller.reveal_next(&mut session).unwrap();
        let first = controller.reveal_hint(&mut session, 2).unwrap();
        let second = controller.reveal_hint(&mut session, 2).unwrap();
        assert_eq!(first, second);
        assert_eq!(session.hints_used().len(), 1);
    }

    #[test]
    fn test_revealed_clues_in_order() {
        let catalog = test_catalog();
        let controller = ClueRevealController::new(&catalog);
        let mut session = controller.start(&CaseId::new("pool-leak")).unwrap();
        controller.reveal_next(&mut session).unwrap();

        let board = controller.revealed_clues(&session).unwrap();
        let ids: Vec<u32> = board.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }
}
