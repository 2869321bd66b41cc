/// Hardware path the backend is asked to use.
///
/// `Cpu` is the constrained-resource mode, `Gpu` the accelerated one. Each mode
/// exposes its own set of valid scale factors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UpscaleMode {
    #[default]
    Cpu,
    Gpu,
}

impl UpscaleMode {
    /// Parses the `<select id="mode">` option value.
    pub fn from_value(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.eq_ignore_ascii_case("cpu") {
            Some(Self::Cpu)
        } else if value.eq_ignore_ascii_case("gpu") {
            Some(Self::Gpu)
        } else {
            None
        }
    }

    pub fn value(self) -> &'static str {
        match self {
            Self::Cpu => "CPU",
            Self::Gpu => "GPU",
        }
    }

    pub fn scale_options(self) -> &'static [ScaleFactor] {
        match self {
            Self::Cpu => &[ScaleFactor::X2, ScaleFactor::X4],
            Self::Gpu => &[
                ScaleFactor::X2,
                ScaleFactor::X4,
                ScaleFactor::X6,
                ScaleFactor::X8,
            ],
        }
    }

    pub fn force_cpu(self) -> bool {
        self == Self::Cpu
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ScaleFactor {
    X2,
    X4,
    X6,
    X8,
}

impl ScaleFactor {
    pub fn from_factor(factor: u32) -> Option<Self> {
        match factor {
            2 => Some(Self::X2),
            4 => Some(Self::X4),
            6 => Some(Self::X6),
            8 => Some(Self::X8),
            _ => None,
        }
    }

    pub fn factor(self) -> u32 {
        match self {
            Self::X2 => 2,
            Self::X4 => 4,
            Self::X6 => 6,
            Self::X8 => 8,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::X2 => "2× (RRDBNet)",
            Self::X4 => "4× (GAN-enhanced)",
            Self::X6 => "6× (Enhanced)",
            Self::X8 => "8× (4K Enhancement)",
        }
    }
}

/// Mode plus scale, kept consistent: the scale is always one of the mode's options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScaleSelection {
    mode: UpscaleMode,
    scale: ScaleFactor,
}

impl ScaleSelection {
    pub fn new(mode: UpscaleMode) -> Self {
        Self {
            mode,
            scale: mode.scale_options()[0],
        }
    }

    pub fn mode(&self) -> UpscaleMode {
        self.mode
    }

    pub fn scale(&self) -> ScaleFactor {
        self.scale
    }

    pub fn options(&self) -> &'static [ScaleFactor] {
        self.mode.scale_options()
    }

    /// Switches mode and replaces the option set in one step. The current scale
    /// survives when the new mode offers it; otherwise the first option is taken.
    pub fn set_mode(&mut self, mode: UpscaleMode) -> bool {
        if mode == self.mode {
            return false;
        }
        self.mode = mode;
        if !mode.scale_options().contains(&self.scale) {
            self.scale = mode.scale_options()[0];
        }
        true
    }

    /// Returns `None` when `factor` is not offered by the current mode.
    pub fn set_scale(&mut self, factor: u32) -> Option<bool> {
        let scale = ScaleFactor::from_factor(factor)
            .filter(|scale| self.mode.scale_options().contains(scale))?;
        let changed = scale != self.scale;
        self.scale = scale;
        Some(changed)
    }
}

impl Default for ScaleSelection {
    fn default() -> Self {
        Self::new(UpscaleMode::default())
    }
}
