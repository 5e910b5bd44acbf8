use crate::rollout::ProgressiveMigration;
use crate::rollout::RollbackPlan;
use crate::rollout::RollbackStrategy;
use crate::rollout::RolloutError;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;

fn manager_with_ops(ops: &[(&str, u8)]) -> ProgressiveMigration {
    let manager = ProgressiveMigration::new();
    for (op, pct) in ops {
        manager.create_feature_flag(op);
        if *pct > 0 {
            manager.start_rollout(op, *pct).unwrap();
        }
    }
    manager
}

fn plan(manager: &ProgressiveMigration, ops: &[&str], strategy: RollbackStrategy) -> RollbackPlan {
    let operation_ids: Vec<String> = ops.iter().map(|op| op.to_string()).collect();
    let checkpoint = manager.create_checkpoint(&operation_ids).unwrap();
    RollbackPlan {
        checkpoint_id: checkpoint.id,
        operation_ids,
        strategy,
    }
}

#[test]
fn checkpoint_snapshots_full_flag_state() {
    let manager = manager_with_ops(&[("a", 40), ("b", 0)]);
    manager
        .enable_for_segments("b", &["beta".to_string()])
        .unwrap();

    let checkpoint = manager
        .create_checkpoint(&["a".to_string(), "b".to_string()])
        .unwrap();
    assert_eq!(checkpoint.flags.len(), 2);
    assert_eq!(checkpoint.flags["a"].rollout_percentage, 40);
    assert_eq!(checkpoint.flags["b"].enabled_segments, vec!["beta".to_string()]);
}

#[test]
fn checkpoint_of_unknown_operation_fails() {
    let manager = manager_with_ops(&[("a", 40)]);
    let result = manager.create_checkpoint(&["a".to_string(), "ghost".to_string()]);
    assert!(matches!(result, Err(RolloutError::FlagNotFound { .. })));
}

#[test]
fn restore_checkpoint_reinstates_state() {
    let manager = manager_with_ops(&[("a", 40)]);
    let checkpoint = manager.create_checkpoint(&["a".to_string()]).unwrap();

    manager.rollback_operation("a").unwrap();
    assert_eq!(manager.flag("a").unwrap().rollout_percentage, 0);

    manager.restore_checkpoint(&checkpoint);
    let flag = manager.flag("a").unwrap();
    assert!(flag.enabled);
    assert_eq!(flag.rollout_percentage, 40);
}

#[test]
fn immediate_rollback_disables_everything() {
    let manager = manager_with_ops(&[("a", 80), ("b", 30)]);
    let plan = plan(&manager, &["a", "b"], RollbackStrategy::Immediate);

    manager.execute_rollback(&plan, || {}).unwrap();

    for op in ["a", "b"] {
        let flag = manager.flag(op).unwrap();
        assert!(!flag.enabled);
        assert_eq!(flag.rollout_percentage, 0);
    }
}

#[test]
fn gradual_rollback_halves_then_disables() {
    let manager = manager_with_ops(&[("a", 80)]);
    let plan = plan(&manager, &["a"], RollbackStrategy::Gradual);

    let observed_midpoint = AtomicBool::new(false);
    manager
        .execute_rollback(&plan, || {
            // Between the two phases the percentage is halved but the
            // flag is still enabled.
            let flag = manager.flag("a").unwrap();
            assert!(flag.enabled);
            assert_eq!(flag.rollout_percentage, 40);
            observed_midpoint.store(true, Ordering::SeqCst);
        })
        .unwrap();

    assert!(observed_midpoint.load(Ordering::SeqCst));
    let flag = manager.flag("a").unwrap();
    assert!(!flag.enabled);
    assert_eq!(flag.rollout_percentage, 0);
}

#[test]
fn gradual_rollback_skips_already_disabled_operations() {
    let manager = manager_with_ops(&[("a", 60), ("b", 0)]);
    // `b` exists but was never enabled.
    let plan = plan(&manager, &["a", "b"], RollbackStrategy::Gradual);

    manager.execute_rollback(&plan, || {}).unwrap();

    assert!(!manager.flag("a").unwrap().enabled);
    assert!(!manager.flag("b").unwrap().enabled);
}

#[test]
fn rollback_of_unknown_operation_propagates() {
    let manager = manager_with_ops(&[("a", 60)]);
    let operation_ids = vec!["a".to_string(), "ghost".to_string()];
    let checkpoint = manager.create_checkpoint(&["a".to_string()]).unwrap();
    let plan = RollbackPlan {
        checkpoint_id: checkpoint.id,
        operation_ids,
        strategy: RollbackStrategy::Immediate,
    };

    let result = manager.execute_rollback(&plan, || {});
    assert!(matches!(result, Err(RolloutError::FlagNotFound { .. })));
    // Partial application is allowed; `a` was already rolled back.
    assert!(!manager.flag("a").unwrap().enabled);
}
