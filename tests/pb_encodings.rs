use satenc::{
    encodings::{
        pb::{self, BoundUpper, BoundUpperIncremental, SequentialWeightCounter},
        EncodeStats, Error, Mode,
    },
    instances::{BasicVarManager, Cnf, ManageVars},
    lit,
    types::Lit,
    var,
};

mod common;

const WEIGHTS: [usize; 6] = [3, 1, 4, 1, 5, 2];

fn items(weights: &[usize]) -> Vec<(Lit, usize)> {
    weights
        .iter()
        .enumerate()
        .map(|(idx, &w)| (lit![u32::try_from(idx).unwrap()], w))
        .collect()
}

fn lits_of(items: &[(Lit, usize)]) -> Vec<Lit> {
    items.iter().map(|&(l, _)| l).collect()
}

#[test]
fn ub_static() {
    let items = items(&WEIGHTS);
    let lits = lits_of(&items);
    let sum: usize = WEIGHTS.iter().sum();
    for ub in 0..=sum {
        let mut solver = common::Solver::default();
        let mut var_manager = BasicVarManager::from_next_free(var![6]);
        let mut swc = SequentialWeightCounter::from(items.clone());
        swc.encode_ub(ub, &mut solver, &mut var_manager).unwrap();
        let assumps = swc.enforce_ub(ub).unwrap();
        assert!(assumps.is_empty());
        common::check_all(&mut solver, &lits, &assumps, |mask| {
            common::weighted_sum(&WEIGHTS, mask) <= ub
        });
    }
}

#[test]
fn ub_incremental() {
    let items = items(&WEIGHTS);
    let lits = lits_of(&items);
    let sum: usize = WEIGHTS.iter().sum();
    for ub in 0..=sum {
        let mut solver = common::Solver::default();
        let mut var_manager = BasicVarManager::from_next_free(var![6]);
        let mut swc = SequentialWeightCounter::from(items.clone()).with_mode(Mode::Incremental);
        swc.encode_ub(ub, &mut solver, &mut var_manager).unwrap();
        let assumps = swc.enforce_ub(ub).unwrap();
        common::check_all(&mut solver, &lits, &assumps, |mask| {
            common::weighted_sum(&WEIGHTS, mask) <= ub
        });
    }
}

#[test]
fn static_tightening() {
    let items = items(&WEIGHTS);
    let lits = lits_of(&items);
    let mut solver = common::Solver::default();
    let mut var_manager = BasicVarManager::from_next_free(var![6]);
    let mut swc = SequentialWeightCounter::from(items);
    for ub in [12, 9, 5, 4, 1] {
        swc.encode_ub(ub, &mut solver, &mut var_manager).unwrap();
        common::check_all(&mut solver, &lits, &[], |mask| {
            common::weighted_sum(&WEIGHTS, mask) <= ub
        });
    }
    assert_eq!(
        swc.encode_ub(3, &mut solver, &mut var_manager),
        Err(Error::NotIncremental)
    );
    assert_eq!(
        swc.update_inc(3, &mut solver, &mut var_manager),
        Err(Error::NotIncremental)
    );
}

#[test]
fn incremental_sequence() {
    let items = items(&WEIGHTS);
    let lits = lits_of(&items);
    for sequence in [[2, 5, 9, 14], [14, 9, 5, 2], [6, 0, 11, 3], [0, 16, 1, 4]] {
        let mut solver = common::Solver::default();
        let mut var_manager = BasicVarManager::from_next_free(var![6]);
        let mut swc = SequentialWeightCounter::from(items.clone()).with_mode(Mode::Incremental);
        swc.encode_ub(sequence[0], &mut solver, &mut var_manager)
            .unwrap();
        for &ub in &sequence[1..] {
            swc.encode_ub_change(ub, &mut solver, &mut var_manager)
                .unwrap();
            let assumps = swc.enforce_ub(ub).unwrap();
            common::check_all(&mut solver, &lits, &assumps, |mask| {
                common::weighted_sum(&WEIGHTS, mask) <= ub
            });
        }
    }
}

#[test]
fn incremental_matches_direct() {
    let items = items(&WEIGHTS);
    let lits = lits_of(&items);
    for (r1, r2) in [(1, 4), (3, 8), (7, 2), (5, 5)] {
        let mut updated = common::Solver::default();
        let mut var_manager = BasicVarManager::from_next_free(var![6]);
        let mut swc = SequentialWeightCounter::from(items.clone()).with_mode(Mode::Incremental);
        swc.encode(r1, &mut updated, &mut var_manager).unwrap();
        swc.update_inc(r2, &mut updated, &mut var_manager).unwrap();
        let updated_assumps = swc.enforce_ub(r2).unwrap();

        let mut direct = common::Solver::default();
        let mut var_manager = BasicVarManager::from_next_free(var![6]);
        let mut swc = SequentialWeightCounter::from(items.clone()).with_mode(Mode::Incremental);
        swc.encode(r2, &mut direct, &mut var_manager).unwrap();
        let direct_assumps = swc.enforce_ub(r2).unwrap();

        for mask in 0..1_usize << lits.len() {
            let mut assumps = common::assignment(&lits, mask);
            assumps.extend_from_slice(&updated_assumps);
            let res_updated = updated.solve(&assumps);
            let mut assumps = common::assignment(&lits, mask);
            assumps.extend_from_slice(&direct_assumps);
            assert_eq!(res_updated, direct.solve(&assumps), "mask {mask:b}");
        }
    }
}

#[test]
fn heavy_items_enter_table() {
    // the weight 5 item does not fit the first bound
    let weights = [5, 1, 2];
    let items = items(&weights);
    let lits = lits_of(&items);
    let mut solver = common::Solver::default();
    let mut var_manager = BasicVarManager::from_next_free(var![3]);
    let mut swc = SequentialWeightCounter::from(items).with_mode(Mode::Incremental);
    swc.encode(2, &mut solver, &mut var_manager).unwrap();
    assert_eq!(swc.unit_lits(), &[(lit![0], 5)]);
    let assumps = swc.enforce_ub(2).unwrap();
    common::check_all(&mut solver, &lits, &assumps, |mask| {
        common::weighted_sum(&weights, mask) <= 2
    });
    swc.update_inc(6, &mut solver, &mut var_manager).unwrap();
    assert!(swc.unit_lits().is_empty());
    let assumps = swc.enforce_ub(6).unwrap();
    common::check_all(&mut solver, &lits, &assumps, |mask| {
        common::weighted_sum(&weights, mask) <= 6
    });
}

#[test]
fn join() {
    let all = items(&WEIGHTS);
    let lits = lits_of(&all);
    let (first, second) = all.split_at(3);
    for mode in [Mode::Static, Mode::Incremental] {
        for ub in [0, 2, 4, 7, 10] {
            let mut solver = common::Solver::default();
            let mut var_manager = BasicVarManager::from_next_free(var![6]);
            let mut swc = SequentialWeightCounter::from(first.to_vec()).with_mode(mode);
            swc.encode(ub, &mut solver, &mut var_manager).unwrap();
            swc.join(second, &mut solver, &mut var_manager).unwrap();
            let assumps = swc.enforce_ub(ub).unwrap();
            common::check_all(&mut solver, &lits, &assumps, |mask| {
                common::weighted_sum(&WEIGHTS, mask) <= ub
            });
        }
    }
}

#[test]
fn join_then_update() {
    let all = items(&WEIGHTS);
    let lits = lits_of(&all);
    let (first, second) = all.split_at(2);
    let mut solver = common::Solver::default();
    let mut var_manager = BasicVarManager::from_next_free(var![6]);
    let mut swc = SequentialWeightCounter::from(first.to_vec()).with_mode(Mode::Incremental);
    swc.encode(3, &mut solver, &mut var_manager).unwrap();
    swc.join(second, &mut solver, &mut var_manager).unwrap();
    swc.update_inc(8, &mut solver, &mut var_manager).unwrap();
    let assumps = swc.enforce_ub(8).unwrap();
    common::check_all(&mut solver, &lits, &assumps, |mask| {
        common::weighted_sum(&WEIGHTS, mask) <= 8
    });
}

#[test]
fn static_trivial_then_tighten() {
    let items = items(&WEIGHTS);
    let lits = lits_of(&items);
    for ub in 0..=16 {
        let mut solver = common::Solver::default();
        let mut var_manager = BasicVarManager::from_next_free(var![6]);
        let mut swc = SequentialWeightCounter::from(items.clone());
        swc.encode(100, &mut solver, &mut var_manager).unwrap();
        assert_eq!(swc.n_clauses(), 0);
        assert_eq!(var_manager.n_used(), 6);
        swc.encode(ub, &mut solver, &mut var_manager).unwrap();
        assert_eq!(swc.enforce_ub(ub), Ok(vec![]));
        common::check_all(&mut solver, &lits, &[], |mask| {
            common::weighted_sum(&WEIGHTS, mask) <= ub
        });
    }
}

#[test]
fn join_errors() {
    let mut cnf = Cnf::new();
    let mut var_manager = BasicVarManager::from_next_free(var![4]);
    let mut swc = SequentialWeightCounter::from(vec![(lit![0], 1), (lit![1], 2)]);
    assert_eq!(
        swc.join(&[(lit![2], 1)], &mut cnf, &mut var_manager),
        Err(Error::NotEncoded)
    );
    swc.encode(2, &mut cnf, &mut var_manager).unwrap();
    assert_eq!(
        swc.join(&[(lit![3], 0)], &mut cnf, &mut var_manager),
        Err(Error::ZeroWeight)
    );
}

#[test]
fn rhs_max_rejected() {
    let mut cnf = Cnf::new();
    let mut var_manager = BasicVarManager::from_next_free(var![2]);
    let mut swc = SequentialWeightCounter::from(vec![(lit![0], 1), (lit![1], 2)]);
    assert_eq!(
        swc.encode(usize::MAX, &mut cnf, &mut var_manager),
        Err(Error::RhsTooLarge(usize::MAX))
    );
    assert!(cnf.is_empty());
    assert_eq!(swc.n_vars(), 0);
}

#[test]
fn default_encoders() {
    let items = items(&[2, 3, 4]);
    let lits = lits_of(&items);
    let mut solver = common::Solver::default();
    let mut var_manager = BasicVarManager::from_next_free(var![3]);
    pb::DefUpperBounding::encode_ub_constr(items, 5, &mut solver, &mut var_manager).unwrap();
    common::check_all(&mut solver, &lits, &[], |mask| {
        common::weighted_sum(&[2, 3, 4], mask) <= 5
    });
}
