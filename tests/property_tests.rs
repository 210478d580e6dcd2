use std::collections::{BTreeSet, HashSet};

use labelkit::{ClusterId, Error, Session};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Split(Vec<usize>),
    Merge(Vec<usize>, usize),
    Rename(usize, String),
}

fn op(n: usize) -> impl Strategy<Value = Op> {
    let picks = prop::collection::vec(0..n, 0..=n);
    prop_oneof![
        picks.clone().prop_map(Op::Split),
        (picks, 0usize..8).prop_map(|(sel, t)| Op::Merge(sel, t)),
        (0usize..8, "[a-c]{1,2}").prop_map(|(t, name)| Op::Rename(t, name)),
    ]
}

fn session_and_ops() -> impl Strategy<Value = (Vec<String>, Vec<Op>)> {
    (1usize..24).prop_flat_map(|n| {
        (
            prop::collection::vec("[a-d]", n),
            prop::collection::vec(op(n), 0..16),
        )
    })
}

fn assert_invariants(session: &Session) -> Result<(), TestCaseError> {
    let p = session.partition();
    prop_assert!(p.is_consistent());
    prop_assert!(session.legend().is_synced_with(p));

    let assigned: BTreeSet<ClusterId> = p.assignment().iter().copied().collect();
    let live: BTreeSet<ClusterId> = p.ids().iter().copied().collect();
    prop_assert_eq!(assigned, live);
    prop_assert_eq!(session.labels_by_index().len(), session.points().count());
    Ok(())
}

proptest! {
    #[test]
    fn prop_initialize_matches_labels(labels in prop::collection::vec("[a-e]{1,3}", 0..40)) {
        let coords = vec![(0.0, 0.0); labels.len()];
        let session = Session::create(coords, &labels, None).unwrap();

        let distinct: HashSet<&String> = labels.iter().collect();
        prop_assert_eq!(session.partition().cluster_count(), distinct.len());
        prop_assert_eq!(session.labels_by_index(), labels);
    }

    #[test]
    fn prop_invariants_hold_under_edits((labels, ops) in session_and_ops()) {
        let coords = vec![(0.0, 0.0); labels.len()];
        let mut session = Session::create(coords, &labels, None).unwrap();
        let mut issued: HashSet<ClusterId> = session.partition().ids().iter().copied().collect();
        assert_invariants(&session)?;

        for op in ops {
            let ids = session.partition().ids().to_vec();
            match op {
                Op::Split(sel) => {
                    let mut ctl = session.controller();
                    ctl.lasso_indices(sel).unwrap();
                    if let Some(id) = ctl.perform_split().unwrap() {
                        prop_assert!(issued.insert(id), "cluster id {} re-issued", id);
                    }
                }
                Op::Merge(sel, t) => {
                    let mut ctl = session.controller();
                    ctl.lasso_indices(sel).unwrap();
                    ctl.perform_merge(ids[t % ids.len()]).unwrap();
                }
                Op::Rename(t, name) => {
                    session.controller().rename(ids[t % ids.len()], name).unwrap();
                }
            }
            assert_invariants(&session)?;
        }
    }

    #[test]
    fn prop_split_then_merge_back_restores_names(
        (labels, picks) in (1usize..30).prop_flat_map(|n| {
            (prop::collection::vec("[a-c]", n), prop::collection::vec(0..n, 1..=n))
        }),
    ) {
        let coords = vec![(0.0, 0.0); labels.len()];
        let mut session = Session::create(coords, &labels, None).unwrap();

        // Restrict the selection to one source cluster so "merge back" has one target.
        let source = session.partition().cluster_of(picks[0]).unwrap();
        let sel: BTreeSet<usize> = picks
            .into_iter()
            .filter(|&i| session.partition().cluster_of(i).unwrap() == source)
            .collect();
        let whole = session.partition().members_of(source).unwrap() == &sel;

        let mut ctl = session.controller();
        ctl.lasso_indices(sel.iter().copied()).unwrap();
        let fresh = ctl.perform_split().unwrap().unwrap();

        if whole {
            // The split emptied the source; merging back needs a live target.
            prop_assert!(!session.partition().contains(source));
            let name = labels[*sel.first().unwrap()].clone();
            session.controller().rename(fresh, name).unwrap();
        } else {
            let mut ctl = session.controller();
            ctl.lasso_indices(sel.iter().copied()).unwrap();
            ctl.perform_merge(source).unwrap();
            prop_assert!(!session.partition().contains(fresh));
        }
        prop_assert_eq!(session.labels_by_index(), labels);
    }

    #[test]
    fn prop_merge_into_own_cluster_is_noop(
        labels in prop::collection::vec("[a-c]", 1..30),
        pick in any::<prop::sample::Index>(),
    ) {
        let coords = vec![(0.0, 0.0); labels.len()];
        let mut session = Session::create(coords, &labels, None).unwrap();
        let i = pick.index(labels.len());
        let own = session.partition().cluster_of(i).unwrap();
        let before_legend = session.legend().entries().to_vec();
        let before_assignment = session.partition().assignment().to_vec();

        let members = session.partition().members_of(own).unwrap().clone();
        let mut ctl = session.controller();
        ctl.lasso_indices(members).unwrap();
        prop_assert!(ctl.perform_merge(own).unwrap());

        prop_assert_eq!(session.legend().entries(), &before_legend[..]);
        prop_assert_eq!(session.partition().assignment(), &before_assignment[..]);
    }

    #[test]
    fn prop_selection_rejects_out_of_range(n in 1usize..20, extra in 0usize..5) {
        let coords = vec![(0.0, 0.0); n];
        let labels = vec!["a"; n];
        let mut session = Session::create(coords, &labels, None).unwrap();
        let bad = n + extra;
        let err = session.controller().lasso_indices([0, bad]).unwrap_err();
        prop_assert_eq!(err, Error::OutOfRange { index: bad, len: n });
        prop_assert!(session.selection().is_empty());
    }
}
