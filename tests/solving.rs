//! End-to-end tests running full searches through the public API.

use calabash_solver::constraints;
use calabash_solver::termination::DecisionBudget;
use calabash_solver::termination::Indefinite;
use calabash_solver::EnumerationResult;
use calabash_solver::OptimisationDirection;
use calabash_solver::OptimisationResult;
use calabash_solver::RestartOptions;
use calabash_solver::SatisfactionResult;
use calabash_solver::SequenceGeneratorType;
use calabash_solver::Solver;
use calabash_solver::TransformableVariable;

#[test]
fn a_chain_of_strict_inequalities_has_a_unique_solution() {
    let mut solver = Solver::default();
    let variables = (0..5)
        .map(|_| solver.new_bounded_integer(1, 5))
        .collect::<Vec<_>>();
    for window in variables.windows(2) {
        let _ = solver
            .post(constraints::binary_less_than(window[0], window[1]))
            .expect("the chain is satisfiable");
    }

    let mut brancher = solver.default_brancher();
    let EnumerationResult::Complete { solutions } =
        solver.enumerate(&mut brancher, &mut Indefinite)
    else {
        panic!("enumeration must run to completion");
    };

    assert_eq!(solutions.len(), 1);
    let values = variables
        .iter()
        .map(|&variable| solutions[0].value_of(variable))
        .collect::<Vec<_>>();
    assert_eq!(values, vec![1, 2, 3, 4, 5]);
}

#[test]
fn posting_an_infeasible_constraint_is_rejected() {
    let mut solver = Solver::default();
    let x = solver.new_bounded_integer(0, 1);
    let y = solver.new_bounded_integer(0, 1);

    let _ = solver
        .post(constraints::binary_less_than(x, y))
        .expect("x < y alone is satisfiable");
    // Together with x < y this cycles, and the domains are too tight to hide
    // it from propagation.
    assert!(solver.post(constraints::binary_less_than(y, x)).is_err());

    let mut brancher = solver.default_brancher();
    assert!(matches!(
        solver.satisfy(&mut brancher, &mut Indefinite),
        SatisfactionResult::Unsatisfiable
    ));
}

#[test]
fn three_overlapping_unit_tasks_overload_a_capacity_of_two() {
    let mut solver = Solver::default();
    let starts = (0..3)
        .map(|_| solver.new_bounded_integer(5, 5))
        .collect::<Vec<_>>();

    let result = solver.post(constraints::cumulative(&starts, &[1, 1, 1], &[1, 1, 1], 2));
    assert!(result.is_err());
}

#[test]
fn a_disjunctive_schedule_is_found_without_overlaps() {
    let mut solver = Solver::default();
    let durations = [2, 3, 2];
    let starts = (0..3)
        .map(|_| solver.new_bounded_integer(0, 10))
        .collect::<Vec<_>>();
    let _ = solver
        .post(constraints::cumulative(&starts, &durations, &[1, 1, 1], 1))
        .expect("the horizon is wide enough");

    let mut brancher = solver.default_brancher();
    let SatisfactionResult::Satisfiable(solution) = solver.satisfy(&mut brancher, &mut Indefinite)
    else {
        panic!("the schedule is satisfiable");
    };

    let mut intervals = starts
        .iter()
        .zip(durations)
        .map(|(&start, duration)| {
            let start = solution.value_of(start);
            (start, start + duration)
        })
        .collect::<Vec<_>>();
    intervals.sort_unstable();
    for window in intervals.windows(2) {
        assert!(window[0].1 <= window[1].0, "tasks overlap: {intervals:?}");
    }
}

#[test]
fn minimising_the_makespan_packs_the_tasks() {
    let mut solver = Solver::default();
    let durations = [2, 3];
    let starts = (0..2)
        .map(|_| solver.new_bounded_integer(0, 10))
        .collect::<Vec<_>>();
    let makespan = solver.new_bounded_integer(0, 20);
    let _ = solver
        .post(constraints::cumulative(&starts, &durations, &[1, 1], 1))
        .expect("the horizon is wide enough");
    for (&start, duration) in starts.iter().zip(durations) {
        // start + duration <= makespan
        let _ = solver
            .post(constraints::less_than_or_equals(
                [start.into(), makespan.scaled(-1)],
                -duration,
            ))
            .expect("consistent");
    }

    let mut brancher = solver.default_brancher();
    let result = solver.optimise(
        OptimisationDirection::Minimise,
        makespan,
        &mut brancher,
        &mut Indefinite,
    );

    let OptimisationResult::Optimal(solution) = result else {
        panic!("expected a proven optimum");
    };
    assert_eq!(solution.value_of(makespan), 5);
}

#[test]
fn restarts_abandon_the_subtree_but_keep_root_deductions() {
    let options = RestartOptions {
        sequence_generator_type: SequenceGeneratorType::Geometric,
        base_interval: 1,
        geometric_coefficient: 2.0,
        ..RestartOptions::default()
    };
    let mut solver = Solver::default().with_restart_options(options);

    // The first decision is free; the conflicts happen one level below it,
    // so the restarts observe a non-trivial decision stack.
    let spacer = solver.new_bounded_integer(0, 1);
    let first = solver.new_bounded_integer(0, 20);
    let second = solver.new_bounded_integer(0, 20);
    let _ = solver
        .post(constraints::binary_less_than_or_equals(second, first))
        .expect("consistent");
    let _ = solver
        .post(constraints::cumulative(
            &[first, second],
            &[3, 3],
            &[1, 1],
            1,
        ))
        .expect("consistent");

    let mut brancher = solver.default_brancher();
    let result = solver.optimise(
        OptimisationDirection::Minimise,
        first,
        &mut brancher,
        &mut Indefinite,
    );

    let OptimisationResult::Optimal(solution) = result else {
        panic!("expected a proven optimum");
    };
    assert_eq!(solution.value_of(spacer), 0);
    assert_eq!(solution.value_of(first), 3);
    assert_eq!(solution.value_of(second), 0);
    assert!(
        solver.statistics().num_restarts > 0,
        "the small cutoffs must trigger at least one restart"
    );
}

#[test]
fn the_solution_limit_truncates_an_enumeration() {
    let mut solver = Solver::default().with_solution_limit(2);
    let x = solver.new_bounded_integer(0, 9);

    let mut brancher = solver.default_brancher();
    let EnumerationResult::Limit { solutions } = solver.enumerate(&mut brancher, &mut Indefinite)
    else {
        panic!("ten solutions exist, the limit must fire");
    };
    assert_eq!(solutions.len(), 2);
    let _ = x;
}

#[test]
fn a_decision_budget_interrupts_the_search() {
    let mut solver = Solver::default();
    // 20 mutually disjoint long tasks on a tight horizon: infeasible, but
    // proving it takes far more than three decisions.
    let starts = (0..20)
        .map(|_| solver.new_bounded_integer(0, 30))
        .collect::<Vec<_>>();
    let _ = solver
        .post(constraints::cumulative(
            &starts,
            &[4; 20],
            &[1; 20],
            2,
        ))
        .expect("not refutable at the root");

    let mut brancher = solver.default_brancher();
    let mut termination = DecisionBudget::new(3);
    assert!(matches!(
        solver.satisfy(&mut brancher, &mut termination),
        SatisfactionResult::Limit
    ));
}

#[test]
fn propagation_alone_can_fix_set_and_graph_variables() {
    let mut solver = Solver::default();

    let set = solver.new_set_var(&[], &[1, 2, 3]);
    let set_size = solver.new_bounded_integer(3, 3);
    let _ = solver
        .post(constraints::set_cardinality(set, set_size))
        .expect("consistent");

    let graph = solver.new_graph_var(4);
    solver.add_potential_edge(graph, 0, 1);
    solver.add_potential_edge(graph, 2, 3);
    let node_count = solver.new_bounded_integer(4, 4);
    let _ = solver
        .post(constraints::graph_node_count(graph, node_count))
        .expect("consistent");

    let mut brancher = solver.default_brancher();
    let SatisfactionResult::Satisfiable(solution) = solver.satisfy(&mut brancher, &mut Indefinite)
    else {
        panic!("satisfiable");
    };

    assert_eq!(solution.set_value_of(set), [1, 2, 3]);
    assert_eq!(solution.graph_value_of(graph).nodes, vec![0, 1, 2, 3]);
}
