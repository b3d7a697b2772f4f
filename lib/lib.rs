#![allow(dead_code, non_snake_case, non_upper_case_globals)]

//! Matrix assembly for networks of coupled bosonic modes — superconducting
//! qubits modeled as truncated harmonic oscillators.
//!
//! A [`QSystem`][network::QSystem] is built once from per-mode frequencies,
//! pairwise couplings, and an explicit set of retained Fock states; it then
//! produces the dense Hamiltonian and ladder-operator matrices consumed by
//! external steady-state and eigenvalue solvers.

pub mod hilbert;
pub mod network;
pub mod hamiltonian;
