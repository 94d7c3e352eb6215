// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2025 William Bro-Jørgensen
// Copyright (c) 2020 Guillaume Fraux and contributors
//
// See LICENSE at the project root for full text.

use std::fmt;

/// Symbol given to the synthetic center-of-mass atom.
pub const COM_SYMBOL: &str = "X";

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Atom {
    pub symbol: String,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Atom {
    pub fn new(symbol: String, x: f64, y: f64, z: f64) -> Self {
        Self { symbol, x, y, z }
    }

    /// A center-of-mass pseudo atom at the given position.
    pub fn com(x: f64, y: f64, z: f64) -> Self {
        Self::new(COM_SYMBOL.to_string(), x, y, z)
    }

    pub fn position(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }
}

// `{:?}` on f64 is the shortest representation that parses back to the same value
impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:?} {:?} {:?}", self.symbol, self.x, self.y, self.z)
    }
}
