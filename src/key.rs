//! Key labels
//!
//! The 25-value output alphabet. Its order is part of the classifier's
//! contract: ties are resolved in favour of the earlier key.

use std::fmt::Display;

use crate::constants::SEMITONES;

/// Number of distinct key labels (12 tonics × 2 modes + silence).
pub const NUM_KEYS: usize = SEMITONES * 2 + 1;

/// Twelve chromatic pitch classes, starting at A to match the key order.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PitchClass {
    /// A
    A,
    /// B flat / A sharp
    BFlat,
    /// B
    B,
    /// C
    C,
    /// D flat / C sharp
    DFlat,
    /// D
    D,
    /// E flat / D sharp
    EFlat,
    /// E
    E,
    /// F
    F,
    /// G flat / F sharp
    GFlat,
    /// G
    G,
    /// A flat / G sharp
    AFlat,
}

impl PitchClass {
    /// All pitch classes in ascending order from A.
    pub const ALL: [PitchClass; SEMITONES] = [
        PitchClass::A,
        PitchClass::BFlat,
        PitchClass::B,
        PitchClass::C,
        PitchClass::DFlat,
        PitchClass::D,
        PitchClass::EFlat,
        PitchClass::E,
        PitchClass::F,
        PitchClass::GFlat,
        PitchClass::G,
        PitchClass::AFlat,
    ];

    /// Semitones above A.
    pub const fn semitones_above_a(self) -> usize {
        self as usize
    }
}

/// Major or minor.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Mode {
    /// Major mode
    Major,
    /// Minor mode
    Minor,
}

/// A detected key.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[allow(missing_docs)]
pub enum Key {
    AMajor,
    AMinor,
    BFlatMajor,
    BFlatMinor,
    BMajor,
    BMinor,
    CMajor,
    CMinor,
    DFlatMajor,
    DFlatMinor,
    DMajor,
    DMinor,
    EFlatMajor,
    EFlatMinor,
    EMajor,
    EMinor,
    FMajor,
    FMinor,
    GFlatMajor,
    GFlatMinor,
    GMajor,
    GMinor,
    AFlatMajor,
    AFlatMinor,
    /// No tonal content scored above the silence baseline.
    Silence,
}

impl Key {
    /// Every key in classifier order.
    pub const ALL: [Key; NUM_KEYS] = [
        Key::AMajor,
        Key::AMinor,
        Key::BFlatMajor,
        Key::BFlatMinor,
        Key::BMajor,
        Key::BMinor,
        Key::CMajor,
        Key::CMinor,
        Key::DFlatMajor,
        Key::DFlatMinor,
        Key::DMajor,
        Key::DMinor,
        Key::EFlatMajor,
        Key::EFlatMinor,
        Key::EMajor,
        Key::EMinor,
        Key::FMajor,
        Key::FMinor,
        Key::GFlatMajor,
        Key::GFlatMinor,
        Key::GMajor,
        Key::GMinor,
        Key::AFlatMajor,
        Key::AFlatMinor,
        Key::Silence,
    ];

    /// Position of this key in [`Key::ALL`].
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Inverse of [`Key::index`].
    pub fn from_index(index: usize) -> Option<Key> {
        Key::ALL.get(index).copied()
    }

    /// Build a key from its tonic and mode.
    pub const fn new(tonic: PitchClass, mode: Mode) -> Key {
        let idx = tonic.semitones_above_a() * 2
            + match mode {
                Mode::Major => 0,
                Mode::Minor => 1,
            };
        Key::ALL[idx]
    }

    /// Tonic pitch class, or `None` for silence.
    pub fn tonic(self) -> Option<PitchClass> {
        match self {
            Key::Silence => None,
            k => Some(PitchClass::ALL[k.index() / 2]),
        }
    }

    /// Mode, or `None` for silence.
    pub fn mode(self) -> Option<Mode> {
        match self {
            Key::Silence => None,
            k if k.index() % 2 == 0 => Some(Mode::Major),
            _ => Some(Mode::Minor),
        }
    }

    /// Short key string such as `"Bb"` or `"Gbm"`; empty for silence.
    pub const fn as_str(self) -> &'static str {
        match self {
            Key::AMajor => "A",
            Key::AMinor => "Am",
            Key::BFlatMajor => "Bb",
            Key::BFlatMinor => "Bbm",
            Key::BMajor => "B",
            Key::BMinor => "Bm",
            Key::CMajor => "C",
            Key::CMinor => "Cm",
            Key::DFlatMajor => "Db",
            Key::DFlatMinor => "Dbm",
            Key::DMajor => "D",
            Key::DMinor => "Dm",
            Key::EFlatMajor => "Eb",
            Key::EFlatMinor => "Ebm",
            Key::EMajor => "E",
            Key::EMinor => "Em",
            Key::FMajor => "F",
            Key::FMinor => "Fm",
            Key::GFlatMajor => "Gb",
            Key::GFlatMinor => "Gbm",
            Key::GMajor => "G",
            Key::GMinor => "Gm",
            Key::AFlatMajor => "Ab",
            Key::AFlatMinor => "Abm",
            Key::Silence => "",
        }
    }
}

impl Display for Key {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
