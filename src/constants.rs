//! Constants
//!
//! The fixed analysis contract. The reference frequencies and tone profiles
//! were tuned together with the kernel parameters below; changing any of them
//! changes classification outcomes.

/// Pitch classes per octave.
pub const SEMITONES: usize = 12;

/// Octaves covered by the chroma vector.
pub const OCTAVES: usize = OCTAVE_WEIGHTS.len();

/// Total chroma bands (`SEMITONES * OCTAVES`).
pub const BANDS: usize = SEMITONES * OCTAVES;

/// Analysis frame length in samples.
pub const FFT_FRAME_SIZE: usize = 16384;

/// Stride between successive analysis frames.
pub const HOP_SIZE: usize = FFT_FRAME_SIZE / 4;

/// Bandwidth stretch applied to the semitone ratio when building the kernel.
pub const DIRECT_SK_STRETCH: f32 = 0.8;

/// Working sample rate expected from the decoder.
pub const DOWNSAMPLED_FRAME_RATE: u32 = 4410;

/// A 72-band chroma vector, ordered octave by octave starting at C1.
pub type ChromaVector = [f32; BANDS];

/// Equal-tempered centre frequencies of each band, C1 (32.70 Hz) to B6.
#[allow(clippy::excessive_precision)]
pub const FREQUENCIES: [f32; BANDS] = [
    32.703_195_662_574_8,
    34.647_828_872_109,
    36.708_095_989_676,
    38.890_872_965_260_1,
    41.203_444_614_108_8,
    43.653_528_929_125_5,
    46.249_302_838_954_3,
    48.999_429_497_718_7,
    51.913_087_197_493_2,
    55.0,
    58.270_470_189_761_3,
    61.735_412_657_015_5,
    65.406_391_325_149_7,
    69.295_657_744_218_1,
    73.416_191_979_351_9,
    77.781_745_930_520_3,
    82.406_889_228_217_5,
    87.307_057_858_251,
    92.498_605_677_908_7,
    97.998_858_995_437_4,
    103.826_174_394_986,
    110.0,
    116.540_940_379_523,
    123.470_825_314_031,
    130.812_782_650_299,
    138.591_315_488_436,
    146.832_383_958_704,
    155.563_491_861_041,
    164.813_778_456_435,
    174.614_115_716_502,
    184.997_211_355_817,
    195.997_717_990_875,
    207.652_348_789_973,
    220.0,
    233.081_880_759_045,
    246.941_650_628_062,
    261.625_565_300_599,
    277.182_630_976_872,
    293.664_767_917_408,
    311.126_983_722_081,
    329.627_556_912_87,
    349.228_231_433_004,
    369.994_422_711_635,
    391.995_435_981_75,
    415.304_697_579_946,
    440.000_000_000_001,
    466.163_761_518_091,
    493.883_301_256_125,
    523.251_130_601_198,
    554.365_261_953_745,
    587.329_535_834_816,
    622.253_967_444_163,
    659.255_113_825_741,
    698.456_462_866_009,
    739.988_845_423_27,
    783.990_871_963_5,
    830.609_395_159_892,
    880.000_000_000_002,
    932.327_523_036_182,
    987.766_602_512_25,
    1_046.502_261_202_4,
    1_108.730_523_907_49,
    1_174.659_071_669_63,
    1_244.507_934_888_33,
    1_318.510_227_651_48,
    1_396.912_925_732_02,
    1_479.977_690_846_54,
    1_567.981_743_927,
    1_661.218_790_319_78,
    1_760.0,
    1_864.655_046_072_36,
    1_975.533_205_024_5,
];

/// Per-octave major template, C-rooted.
#[allow(clippy::excessive_precision)]
const MAJOR_PROFILE_OCTAVE: [f32; SEMITONES] = [
    7.239_005_026_181_452_251_42,
    3.503_511_667_251_586_914_06,
    3.584_451_775_366_494_175_05,
    2.845_118_164_786_763_159_67,
    5.818_988_921_185_498_597_31,
    4.558_650_574_153_210_399_69,
    2.447_788_505_455_065_433_13,
    6.994_731_921_468_295_254_84,
    3.391_066_136_735_048_530_68,
    4.556_142_566_551_434_569_53,
    4.073_926_666_635_236_060_19,
    4.459_327_573_788_868_903_65,
];

/// Per-octave minor template, C-rooted.
#[allow(clippy::excessive_precision)]
const MINOR_PROFILE_OCTAVE: [f32; SEMITONES] = [
    7.002_550_450_602_844_200_89,
    3.143_602_790_159_966_797_75,
    4.359_043_197_149_625_292_75,
    5.404_181_207_189_340_696_57,
    3.672_344_208_793_061_337_56,
    4.089_711_849_177_978_919_56,
    3.907_914_359_915_539_925_79,
    6.199_602_885_623_164_638_67,
    3.634_246_256_252_774_198_71,
    2.872_411_910_798_755_574_35,
    5.354_679_997_945_426_706,
    3.832_420_385_950_483_510_13,
];

/// Relative weight of each octave in both templates.
#[allow(clippy::excessive_precision)]
const OCTAVE_WEIGHTS: [f32; 6] = [
    0.399_972_675_499_999_985_59,
    0.556_344_252_483_006_451_73,
    0.524_966_363_451_435_436,
    0.608_475_483_842_777_276_07,
    0.598_981_156_799_999_969_74,
    0.490_724_353_179_609_940_06,
];

/// 72-band major reference profile: each octave weight times the octave template.
pub fn major_profile() -> ChromaVector {
    tile(&MAJOR_PROFILE_OCTAVE)
}

/// 72-band minor reference profile.
pub fn minor_profile() -> ChromaVector {
    tile(&MINOR_PROFILE_OCTAVE)
}

fn tile(octave: &[f32; SEMITONES]) -> ChromaVector {
    std::array::from_fn(|band| OCTAVE_WEIGHTS[band / SEMITONES] * octave[band % SEMITONES])
}
