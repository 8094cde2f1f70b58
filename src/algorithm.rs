// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Algorithms drive an equation until a point is classified.
//!
//! The bailout algorithm is the classic escape-time loop: iterate
//! until the orbit leaves the disc of the given (squared) radius or
//! until the iteration budget runs out, in which case the point is
//! deemed inside the set.  Without a fixed constant it seeds itself
//! Mandelbrot-style (`c := z₀`, `z₀ := 0`); with one it draws the
//! matching Julia set.
//!
//! The Newton algorithm runs Newton's method on the equation and stops
//! once consecutive approximations are within `epsilon` of each other.

use serde::{Deserialize, Serialize};

use complex::{Complex, ComplexOps, ZERO};
use equation::Equation;
use error::{from_record, to_record, FractalError, Result};

/// What an algorithm reports about one point.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct IterationResult {
    /// Iterations performed.  Equal to the algorithm's `max_iter` when
    /// the point never escaped (or never converged).
    pub count: u32,
    /// The last value of the orbit, or the root reached by Newton.
    pub z: Complex,
}

/// The capability shared by every algorithm.
pub trait Iterate {
    /// Classifies one point of the complex plane.
    fn iterate(&self, z: Complex) -> IterationResult;

    /// The iteration budget.
    fn max_iter(&self) -> u32;
}

/// Escape-time iteration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BailoutAlgorithm {
    equation: Equation,
    max_iter: u32,
    radius: f64,
    c: Option<Complex>,
}

impl BailoutAlgorithm {
    /// `radius` bounds the squared modulus of the orbit.  A `c` of
    /// `None` renders the Mandelbrot-style set, `Some(c)` the Julia
    /// set of that constant.
    pub fn new(equation: Equation, max_iter: u32, radius: f64, c: Option<Complex>) -> Self {
        BailoutAlgorithm {
            equation,
            max_iter,
            radius,
            c,
        }
    }

    /// The squared escape radius.
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Changes the squared escape radius.
    pub fn set_radius(&mut self, radius: f64) {
        self.radius = radius;
    }

    /// The fixed constant, if any.
    pub fn constant(&self) -> Option<Complex> {
        self.c
    }

    /// Fixes (or, with `None`, releases) the constant.
    pub fn set_constant(&mut self, c: Option<Complex>) {
        self.c = c;
    }
}

impl Iterate for BailoutAlgorithm {
    fn iterate(&self, z: Complex) -> IterationResult {
        let (mut z, c) = match self.c {
            Some(c) => (z, c),
            None => (ZERO, z),
        };
        let mut count = 0;
        while z.squared_modulus() <= self.radius && count < self.max_iter {
            z = self.equation.step(z, c);
            count += 1;
        }
        IterationResult { count, z }
    }

    fn max_iter(&self) -> u32 {
        self.max_iter
    }
}

/// Newton's method root finding.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewtonAlgorithm {
    equation: Equation,
    max_iter: u32,
    epsilon: f64,
}

impl NewtonAlgorithm {
    /// `epsilon` bounds the squared distance between two consecutive
    /// approximations.
    pub fn new(equation: Equation, max_iter: u32, epsilon: f64) -> Self {
        NewtonAlgorithm {
            equation,
            max_iter,
            epsilon,
        }
    }

    /// The convergence bound.
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Changes the convergence bound.
    pub fn set_epsilon(&mut self, epsilon: f64) {
        self.epsilon = epsilon;
    }
}

impl Iterate for NewtonAlgorithm {
    // Always takes at least one step, even from an exact root.
    fn iterate(&self, z: Complex) -> IterationResult {
        let mut z = z;
        let mut count = 0;
        loop {
            let next = self.equation.newton_step(z);
            let delta = z.minus(next).squared_modulus();
            z = next;
            count += 1;
            if !(delta > self.epsilon && count < self.max_iter) {
                break;
            }
        }
        IterationResult { count, z }
    }

    fn max_iter(&self) -> u32 {
        self.max_iter
    }
}

/// The closed set of algorithms a coloring can be built on.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "_type")]
pub enum Algorithm {
    /// Escape-time iteration.
    #[serde(rename = "BailoutAlgo", alias = "BailoutAlgorithm")]
    Bailout(BailoutAlgorithm),
    /// Newton root finding.
    #[serde(rename = "NewtonAlgo", alias = "NewtonAlgorithm")]
    Newton(NewtonAlgorithm),
}

impl Algorithm {
    /// The iterated equation.
    pub fn equation(&self) -> Equation {
        match *self {
            Algorithm::Bailout(ref a) => a.equation,
            Algorithm::Newton(ref a) => a.equation,
        }
    }

    /// Swaps the iterated equation.
    pub fn set_equation(&mut self, equation: Equation) {
        match *self {
            Algorithm::Bailout(ref mut a) => a.equation = equation,
            Algorithm::Newton(ref mut a) => a.equation = equation,
        }
    }

    /// Changes the iteration budget.
    pub fn set_max_iter(&mut self, max_iter: u32) {
        match *self {
            Algorithm::Bailout(ref mut a) => a.max_iter = max_iter,
            Algorithm::Newton(ref mut a) => a.max_iter = max_iter,
        }
    }

    /// Checks that every floating-point parameter is finite.  NaN and
    /// the infinities have no JSON spelling, so such an algorithm could
    /// not be handed to a render worker.
    pub fn validate(&self) -> Result<()> {
        let mut params = vec![];
        match *self {
            Algorithm::Bailout(ref a) => {
                params.push(("radius", a.radius));
                if let Some(c) = a.c {
                    params.push(("c.re", c.re));
                    params.push(("c.im", c.im));
                }
            }
            Algorithm::Newton(ref a) => params.push(("epsilon", a.epsilon)),
        }
        match params.into_iter().find(|&(_, value)| !value.is_finite()) {
            Some((name, value)) => Err(FractalError::Config(format!(
                "{} must be finite, not {}",
                name, value
            ))),
            None => Ok(()),
        }
    }

    /// The tagged JSON record.  Fails like [`Algorithm::validate`].
    pub fn to_json(&self) -> Result<String> {
        self.validate()?;
        to_record("algorithm", self)
    }

    /// Rebuilds an algorithm from its tagged record.
    pub fn from_json(json: &str) -> Result<Algorithm> {
        from_record("algorithm", json)
    }
}

impl Iterate for Algorithm {
    fn iterate(&self, z: Complex) -> IterationResult {
        match *self {
            Algorithm::Bailout(ref a) => a.iterate(z),
            Algorithm::Newton(ref a) => a.iterate(z),
        }
    }

    fn max_iter(&self) -> u32 {
        match *self {
            Algorithm::Bailout(ref a) => a.max_iter,
            Algorithm::Newton(ref a) => a.max_iter,
        }
    }
}

impl From<BailoutAlgorithm> for Algorithm {
    fn from(a: BailoutAlgorithm) -> Self {
        Algorithm::Bailout(a)
    }
}

impl From<NewtonAlgorithm> for Algorithm {
    fn from(a: NewtonAlgorithm) -> Self {
        Algorithm::Newton(a)
    }
}
