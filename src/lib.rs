//! # Rush Hour Solver Library
//!
//! This library provides the core data model for the Rush Hour sliding-block
//! puzzle and four search strategies for solving it: Uniform Cost Search,
//! Greedy Best-First Search, A*, and Iterative Deepening A*.
//!
//! A puzzle is a rectangular board holding one primary vehicle, any number of
//! blocking vehicles, and a single exit on one edge. A move slides one
//! vehicle along its own axis to any reachable position, at a cost of 1
//! regardless of distance. The solvers explore the implicit graph of board
//! states produced by `Board::successors` and report either a solution path
//! with statistics or exhaustion of the state space.
//!
//! The library is used by one binary:
//! - `solve`: reads a puzzle file, runs a chosen strategy and heuristic, and
//!   prints the move sequence and search statistics.
//!
//! ## Modules
//! - `engine`: board representation (`Board`), vehicles (`Piece`), moves
//!   (`Move`), the exit, successor generation, and construction validation.
//! - `heuristics`: lower-bound estimators from a board state to the goal.
//! - `solver`: the four search strategies and shared node/outcome types.
//! - `utils`: text fixture parsing and seeded random puzzle generation.

pub mod engine;
pub mod heuristics;
pub mod solver;
pub mod utils;
