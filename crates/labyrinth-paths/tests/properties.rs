//! Properties of generated mazes and of the step-driven search over them.

use std::collections::HashMap;

use labyrinth_core::{Grid, MazeError, Point, PositionFault, Tile};
use labyrinth_gen::{MazeConfig, generate};
use labyrinth_paths::{AstarSearch, MazeShape, SearchMetrics, Status, shortest_distance};

fn configs() -> impl Iterator<Item = MazeConfig> {
    (0..24u64).map(|seed| MazeConfig::new(1 + (seed % 11) as i32, 1 + (seed % 7) as i32, seed))
}

/// Endpoint pairs worth searching in a maze: corner to corner, plus a
/// couple of interior rooms when the maze is big enough.
fn endpoints(cfg: &MazeConfig) -> Vec<(Point, Point)> {
    let mut pairs = Vec::new();
    if cfg.start() != cfg.goal() {
        pairs.push((cfg.start(), cfg.goal()));
        pairs.push((cfg.goal(), cfg.start()));
    }
    if cfg.width > 2 && cfg.height > 2 {
        pairs.push((Point::new(3, 3), Point::new(cfg.width * 2 - 1, 1)));
    }
    pairs
}

#[test]
fn generated_mazes_are_spanning_trees() {
    for cfg in configs() {
        let g = cfg.generate().unwrap();
        let shape = MazeShape::of(&g);
        assert_eq!(shape.regions, 1, "{cfg:?} is disconnected");
        assert_eq!(shape.passages + 1, shape.open_cells, "{cfg:?} has a cycle");
        assert!(shape.is_perfect());
    }
}

#[test]
fn search_terminates_within_path_cell_count() {
    for cfg in configs() {
        let g = cfg.generate().unwrap();
        let budget = g.count(Tile::Path);
        for (start, goal) in endpoints(&cfg) {
            let mut s = AstarSearch::new(&g, start, goal).unwrap();
            let mut calls = 0;
            while !s.step().is_terminal() {
                calls += 1;
                assert!(calls <= budget, "{cfg:?} {start}->{goal} did not terminate");
            }
            assert!(calls < budget);
        }
    }
}

#[test]
fn found_paths_are_shortest() {
    for cfg in configs() {
        let g = cfg.generate().unwrap();
        for (start, goal) in endpoints(&cfg) {
            let mut s = AstarSearch::new(&g, start, goal).unwrap();
            assert_eq!(s.run(), Status::GoalFound);

            let path = s.path();
            assert_eq!(path.first(), Some(&start));
            assert_eq!(path.last(), Some(&goal));
            for w in path.windows(2) {
                assert_eq!(labyrinth_paths::manhattan(w[0], w[1]), 1);
                assert!(g.is_path(w[1]));
            }

            let bfs = shortest_distance(&g, start, goal).unwrap();
            assert_eq!(path.len() as i32 - 1, bfs, "{cfg:?} {start}->{goal}");
            assert_eq!(s.g_score(goal), Some(bfs));
        }
    }
}

#[test]
fn explored_grows_and_costs_never_rise() {
    for cfg in configs().take(10) {
        let g = cfg.generate().unwrap();
        for (start, goal) in endpoints(&cfg) {
            let mut s = AstarSearch::new(&g, start, goal).unwrap();
            let mut best: HashMap<Point, i32> = HashMap::new();
            let mut last_explored = 0;
            loop {
                let status = s.step();
                let explored = s.explored();
                assert!(explored.len() >= last_explored);
                // Earlier entries are never rewritten.
                assert!(explored.len() <= last_explored + 1);
                last_explored = explored.len();

                for p in g.path_cells() {
                    if let Some(gs) = s.g_score(p) {
                        let prev = best.entry(p).or_insert(gs);
                        assert!(gs <= *prev, "g rose at {p}");
                        *prev = gs;
                    }
                }
                if status.is_terminal() {
                    break;
                }
            }
            let mut unique = s.explored().to_vec();
            unique.sort();
            unique.dedup();
            assert_eq!(unique.len(), s.explored().len());
        }
    }
}

#[test]
fn terminal_state_is_frozen() {
    let cfg = MazeConfig::new(8, 6, 3);
    let g = cfg.generate().unwrap();
    let mut s = AstarSearch::new(&g, cfg.start(), cfg.goal()).unwrap();
    let status = s.run();
    let explored = s.explored().to_vec();
    let path = s.path().to_vec();
    let open = s.open_len();
    for _ in 0..5 {
        assert_eq!(s.step(), status);
    }
    assert_eq!(s.explored(), explored.as_slice());
    assert_eq!(s.path(), path.as_slice());
    assert_eq!(s.open_len(), open);
}

#[test]
fn seed_42_exploration_golden() {
    let g = generate(3, 3, 42).unwrap();
    assert_eq!(
        g.to_string(),
        "#######\n#.....#\n#.###.#\n#...#.#\n###.#.#\n#...#.#\n#######"
    );

    let p = Point::new;
    let mut s = AstarSearch::new(&g, p(1, 1), p(5, 5)).unwrap();
    assert_eq!(s.run(), Status::GoalFound);
    assert_eq!(
        s.explored(),
        &[
            p(1, 1),
            p(2, 1),
            p(3, 1),
            p(4, 1),
            p(5, 1),
            p(1, 2),
            p(5, 2),
            p(1, 3),
            p(2, 3),
            p(3, 3),
            p(5, 3),
            p(3, 4),
            p(5, 4),
            p(3, 5),
            p(5, 5),
        ]
    );
    assert_eq!(
        s.path(),
        &[
            p(1, 1),
            p(2, 1),
            p(3, 1),
            p(4, 1),
            p(5, 1),
            p(5, 2),
            p(5, 3),
            p(5, 4),
            p(5, 5),
        ]
    );
    // The dead end at (1,5) is never reached; (2,5) is left on the open set.
    assert!(!s.is_explored(p(2, 5)));
    assert_eq!(s.g_score(p(2, 5)), Some(7));
}

#[test]
fn exploration_is_reproducible() {
    let run = || {
        let g = generate(12, 9, 42).unwrap();
        let mut s = AstarSearch::new(&g, Point::new(1, 1), Point::new(23, 17)).unwrap();
        s.run();
        (s.explored().to_vec(), s.path().to_vec())
    };
    assert_eq!(run(), run());
}

#[test]
fn walled_off_goal_reports_no_path() {
    let cfg = MazeConfig::new(6, 6, 17);
    let g = cfg.generate().unwrap();
    let goal = cfg.goal();
    let sealed = g
        .neighbors(goal)
        .collect::<Vec<_>>()
        .into_iter()
        .fold(g.clone(), |acc, n| acc.with_tile(n, Tile::Wall));
    assert_eq!(sealed.neighbors(goal).count(), 0);

    let mut s = AstarSearch::new(&sealed, cfg.start(), goal).unwrap();
    let budget = sealed.count(Tile::Path);
    let mut calls = 0;
    while s.step() == Status::Searching {
        calls += 1;
        assert!(calls < budget);
    }
    assert_eq!(s.status(), Status::NoPath);
    assert!(s.path().is_empty());
    assert!(!s.is_explored(goal));

    let m = SearchMetrics::from_search(&s, std::time::Duration::ZERO);
    assert!(!m.success);
    assert_eq!(m.nodes_explored, s.explored().len());
}

#[test]
fn same_start_and_goal_is_rejected() {
    let g = generate(3, 3, 42).unwrap();
    let start = Point::new(1, 1);
    assert_eq!(
        AstarSearch::new(&g, start, start).err(),
        Some(MazeError::InvalidPosition {
            pos: start,
            reason: PositionFault::StartIsGoal
        })
    );
}

#[test]
fn one_by_one_maze_has_a_single_open_tile() {
    let g: Grid = generate(1, 1, 99).unwrap();
    assert_eq!(g.to_matrix(), vec![vec![1, 1, 1], vec![1, 0, 1], vec![1, 1, 1]]);
    // There is nowhere to go: the only open tile is both start and goal.
    assert!(AstarSearch::new(&g, Point::new(1, 1), Point::new(1, 1)).is_err());
}
