pub(crate) use rgb::RGB8;

/// A named lookup table of the catalog.
pub(crate) struct PaletteData {
    pub(crate) name: &'static str,
    pub(crate) rgb: Vec<RGB8>, // Invariant: length ≥ 2
    pub(crate) typ: PaletteType,
}

/// Type of palette.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PaletteType {
    /// Sequential color scheme, suited to ordered data that progress
    /// from low to high.  Lightness steps dominate the look of these
    /// schemes.
    Seq,
    /// Divergent color scheme.  They put equal emphasis on mid-range
    /// critical values and extremes at both ends of the data
    /// range.
    Div,
    /// Qualitative color scheme.  Hues are used to create the primary
    /// visual differences between entries; they do not imply
    /// magnitude differences.
    Qual,
}
