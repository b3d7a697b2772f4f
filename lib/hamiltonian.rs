//! Hamiltonian and ladder-operator matrix assembly for a coupled-mode
//! network.
//!
//! All matrices are dense, sized to the truncated [`Basis`], and recomputed
//! on every call; the builder holds only borrowed, immutable specification
//! data.

use ndarray::{ self as nd, s };
use ndarray_linalg::{ EighInto, UPLO };
use num_complex::Complex64 as C64;
use crate::{
    hilbert::Basis,
    network::{ CouplingTerm, FrequencyTerm },
};

/// Hamiltonian builder for a network of coupled bosonic modes over a
/// truncated Fock basis.
///
/// Off-diagonal elements come from coupling terms `g * a†_source a_target`,
/// diagonal elements from frequency terms `w * a†_mode a_mode`. Operator
/// action whose resulting state falls outside the basis ("leakage")
/// contributes zero.
#[derive(Copy, Clone, Debug)]
pub struct HBuilderNetwork<'a> {
    pub(crate) basis: &'a Basis,
    pub(crate) frequencies: &'a [FrequencyTerm],
    pub(crate) couplings: &'a [CouplingTerm],
    pub(crate) complete_conjugate: bool,
}

impl<'a> HBuilderNetwork<'a> {
    /// Create a new `HBuilderNetwork`.
    ///
    /// Term mode indices are assumed to have been validated against the mode
    /// count (see [`QSystem::new`][crate::network::QSystem::new]).
    pub fn new(
        basis: &'a Basis,
        frequencies: &'a [FrequencyTerm],
        couplings: &'a [CouplingTerm],
        complete_conjugate: bool,
    ) -> Self
    {
        Self { basis, frequencies, couplings, complete_conjugate }
    }

    /// Return a reference to the basis.
    pub fn basis(&self) -> &Basis { self.basis }

    /// Compute the Hamiltonian matrix.
    ///
    /// When conjugate completion is enabled, the off-diagonal block is
    /// symmetrized by adding its conjugate transpose and the result is
    /// Hermitian by construction; otherwise the coupling list is taken
    /// verbatim.
    pub fn gen_static(&self) -> nd::Array2<C64> {
        self.gen_static_with_leakage().0
    }

    /// Like [`Self::gen_static`], but also counting the contributions dropped
    /// because the resulting state fell outside the basis.
    ///
    /// The count covers the coupling terms as supplied, before conjugate
    /// completion; frequency terms map every state to itself and cannot leak.
    pub fn gen_static_with_leakage(&self) -> (nd::Array2<C64>, usize) {
        let n = self.basis.num_states();
        let mut H_diag: nd::Array2<C64> = nd::Array2::zeros((n, n));
        let mut H_cross: nd::Array2<C64> = nd::Array2::zeros((n, n));
        let mut leaked: usize = 0;
        for (i, state) in self.basis.iter().enumerate() {
            for g in self.couplings.iter() {
                let Some((lowered, amp_a)) = state.annihilate(g.target)
                    else { continue; };
                let Some((raised, amp_c)) = lowered.create(g.source)
                    else { continue; };
                if let Some(j) = self.basis.get_index_of(&raised) {
                    H_cross[[i, j]] += g.strength * (amp_a * amp_c);
                } else {
                    leaked += 1;
                }
            }
            for f in self.frequencies.iter() {
                // lower-then-raise on one mode returns the same state with
                // amplitude equal to its occupation
                let Some((lowered, amp_a)) = state.annihilate(f.mode)
                    else { continue; };
                let Some((_, amp_c)) = lowered.create(f.mode)
                    else { continue; };
                H_diag[[i, i]] += C64::from(f.frequency * amp_a * amp_c);
            }
        }
        let mut H = H_diag + &H_cross;
        if self.complete_conjugate {
            H += &H_cross.t().mapv(|a| a.conj());
        }
        (H, leaked)
    }

    /// Compute the matrix of a single mode's annihilation operator.
    ///
    /// The column index is the state acted upon and the row index the
    /// resulting state; the creation operator matrix is the conjugate
    /// transpose.
    pub fn gen_annihilation(&self, mode: usize) -> nd::Array2<C64> {
        let n = self.basis.num_states();
        let mut a: nd::Array2<C64> = nd::Array2::zeros((n, n));
        for (i, state) in self.basis.iter().enumerate() {
            if let Some((lowered, amp)) = state.annihilate(mode) {
                if let Some(j) = self.basis.get_index_of(&lowered) {
                    a[[j, i]] = amp.into();
                }
            }
        }
        a
    }

    /// Compute the transverse drive term `(amplitude / 2) (a + a†)` for a
    /// single mode.
    ///
    /// `amplitude` is in units of angular frequency; the result is Hermitian.
    pub fn gen_drive(&self, mode: usize, amplitude: f64) -> nd::Array2<C64> {
        let a = self.gen_annihilation(mode);
        let adag = a.t().mapv(|x| x.conj());
        (a + adag) * C64::from(0.5 * amplitude)
    }

    /// Compute the diagonal rotating-frame correction for a monochromatic
    /// drive: `-drive_frequency` times the total occupation of each basis
    /// state.
    pub fn gen_rotating_frame_shift(&self, drive_frequency: f64)
        -> nd::Array2<C64>
    {
        let diag: nd::Array1<C64>
            = self.basis.iter()
            .map(|state| {
                C64::from(-drive_frequency * state.total_occupation() as f64)
            })
            .collect();
        nd::Array2::from_diag(&diag)
    }

    /// Diagonalize the [Hamiltonian][Self::gen_static].
    ///
    /// Meaningful only with conjugate completion enabled or a coupling list
    /// that is Hermitian by hand; only the lower triangle is referenced.
    pub fn diagonalize(&self) -> (nd::Array1<f64>, nd::Array2<C64>) {
        match self.gen_static().eigh_into(UPLO::Lower) {
            Ok((E, V)) => (E, V),
            Err(err) => panic!("unexpected diagonalization error: {}", err),
        }
    }

    /// Diagonalize the [Hamiltonian][Self::gen_static] and return a ground
    /// state of the network.
    ///
    /// Note that, in general, there may be more than one state that minimizes
    /// the energy of the system; this method offers no guarantees about which
    /// ground state is returned.
    pub fn ground_state(&self) -> (f64, nd::Array1<C64>) {
        let (E, V) = self.diagonalize();
        let e: f64 = E[0];
        let v: nd::Array1<C64> = V.slice(s![.., 0]).to_owned();
        (e, v)
    }
}
