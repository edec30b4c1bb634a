use std::collections::HashMap;

/// d3's `schemeCategory10`.
pub const CATEGORY10: [&str; 10] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
    "#bcbd22", "#17becf",
];

/// Ordinal color scale keyed by satellite id. A new id takes the next slot in
/// encounter order; an id keeps its slot for the palette's lifetime.
#[derive(Debug, Default)]
pub struct Palette {
    slots: HashMap<u32, usize>,
}

impl Palette {
    pub fn color_for(&mut self, satid: u32) -> &'static str {
        let next = self.slots.len();
        let slot = *self.slots.entry(satid).or_insert(next);
        CATEGORY10[slot % CATEGORY10.len()]
    }

    pub fn assigned(&self, satid: u32) -> Option<&'static str> {
        self.slots
            .get(&satid)
            .map(|slot| CATEGORY10[slot % CATEGORY10.len()])
    }
}
