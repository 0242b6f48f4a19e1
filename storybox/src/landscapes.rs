/// Horizontal strip of landscape chips with at most one highlighted.

#[derive(Clone, Debug)]
pub struct LandscapeStrip {
    chips: Vec<String>,
    active: Option<usize>,
}

impl LandscapeStrip {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            chips: names.into_iter().map(Into::into).collect(),
            active: None,
        }
    }

    /// Clear every chip, then highlight the one named `name` if it exists.
    pub fn highlight(&mut self, name: &str) -> Option<usize> {
        self.active = self.chips.iter().position(|chip| chip == name);
        self.active
    }

    pub fn active(&self) -> Option<&str> {
        self.active.map(|i| self.chips[i].as_str())
    }

    /// One-line rendering with the active chip bracketed.
    pub fn render(&self) -> String {
        self.chips
            .iter()
            .enumerate()
            .map(|(i, chip)| {
                if Some(i) == self.active {
                    format!("[{chip}]")
                } else {
                    chip.clone()
                }
            })
            .collect::<Vec<_>>()
            .join("  ")
    }
}
