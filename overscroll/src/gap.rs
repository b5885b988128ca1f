//! Reading the visible head/tail gap lengths out of the host's layout.

/// One of the two boundaries of the content.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Edge {
    /// Before the first item.
    Head,
    /// After the last item.
    Tail,
}

/// Rendered extent of a gap marker along the scroll axis, in physical pixels measured from the
/// container's top (vertical) or left (horizontal) edge.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MarkerBounds {
    pub start: i32,
    pub end: i32,
}

/// Layout snapshot the host reports on demand.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GapLayout {
    /// Container size along the scroll axis (height or width), padding included.
    pub viewport_extent: i32,
    /// Padding at the physical top/left.
    pub padding_start: i32,
    /// Padding at the physical bottom/right.
    pub padding_end: i32,
    /// Head marker bounds, or `None` when it is not the first laid-out child.
    pub head: Option<MarkerBounds>,
    /// Tail marker bounds, or `None` when it is not the last laid-out child.
    pub tail: Option<MarkerBounds>,
    /// The tail marker covers the whole viewport (no items on screen), so its visible length
    /// cannot be read from layout.
    pub tail_fills_viewport: bool,
    /// Number of real items (markers excluded).
    pub item_count: usize,
    /// Estimated total content length; see [`estimate_content_extent`]. Only consulted for
    /// short lists.
    pub estimated_content_extent: Option<u64>,
}

/// Visible gap lengths in physical pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Gaps {
    pub head: u32,
    pub tail: u32,
}

impl Gaps {
    pub fn is_empty(&self) -> bool {
        self.head == 0 && self.tail == 0
    }

    /// The edge whose gap is showing, head first.
    pub fn edge(&self) -> Option<Edge> {
        if self.head > 0 {
            Some(Edge::Head)
        } else if self.tail > 0 {
            Some(Edge::Tail)
        } else {
            None
        }
    }

    /// Length of the visible gap (head preferred), 0 when neither shows.
    pub fn visible(&self) -> u32 {
        if self.head > 0 { self.head } else { self.tail }
    }

    pub fn get(&self, edge: Edge) -> u32 {
        match edge {
            Edge::Head => self.head,
            Edge::Tail => self.tail,
        }
    }
}

/// Averages up to `limit` laid-out item extents and scales the mean by `item_count`.
///
/// Returns 0 when no samples are available.
pub fn estimate_content_extent(
    samples: impl IntoIterator<Item = u32>,
    item_count: usize,
    limit: usize,
) -> u64 {
    let mut total = 0u64;
    let mut n = 0u64;
    for size in samples.into_iter().take(limit) {
        total = total.saturating_add(size as u64);
        n += 1;
    }
    if n == 0 {
        return 0;
    }
    let average = total as f64 / n as f64;
    (average * item_count as f64) as u64
}

/// Turns [`GapLayout`] snapshots into [`Gaps`].
///
/// The only state is the last tail reading, which stands in for the layout when the tail
/// marker fills the whole viewport.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GapEstimator {
    prev_tail: u32,
}

impl GapEstimator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn previous_tail(&self) -> u32 {
        self.prev_tail
    }

    /// Feeds a logical scroll delta (positive toward the tail). Only affects the estimate while
    /// the tail marker fills the viewport.
    pub fn note_scroll(&mut self, layout: &GapLayout, logical_delta: i32) {
        if layout.tail_fills_viewport {
            let next = (self.prev_tail as i64 + logical_delta as i64).max(0);
            self.prev_tail = next.min(u32::MAX as i64) as u32;
        }
    }

    pub fn estimate(
        &mut self,
        layout: &GapLayout,
        reversed: bool,
        max_adapter_size_to_estimate: usize,
    ) -> Gaps {
        Gaps {
            head: Self::head_visible(layout, reversed),
            tail: self.tail_visible(layout, reversed, max_adapter_size_to_estimate),
        }
    }

    fn head_visible(layout: &GapLayout, reversed: bool) -> u32 {
        let Some(head) = layout.head else {
            return 0;
        };
        if reversed {
            leading_visible(layout, head)
        } else {
            trailing_visible(layout, head)
        }
    }

    fn tail_visible(
        &mut self,
        layout: &GapLayout,
        reversed: bool,
        max_adapter_size_to_estimate: usize,
    ) -> u32 {
        if layout.tail_fills_viewport {
            return self.prev_tail;
        }
        let Some(tail) = layout.tail else {
            self.prev_tail = 0;
            return 0;
        };

        let mut visible = if reversed {
            trailing_visible(layout, tail) as i64
        } else {
            leading_visible(layout, tail) as i64
        };

        if layout.item_count <= max_adapter_size_to_estimate {
            visible -= content_shortfall(layout) as i64;
        }

        let visible = visible.max(0).min(u32::MAX as i64) as u32;
        self.prev_tail = visible;
        visible
    }
}

/// Portion of `marker` between the content box's top/left edge and the marker's far side.
fn trailing_visible(layout: &GapLayout, marker: MarkerBounds) -> u32 {
    (marker.end - layout.padding_start).max(0) as u32
}

/// Portion of `marker` between its near side and the content box's bottom/right edge.
fn leading_visible(layout: &GapLayout, marker: MarkerBounds) -> u32 {
    (layout.viewport_extent - marker.start - layout.padding_end).max(0) as u32
}

/// How much shorter the content is than the container, 0 when it fills it.
fn content_shortfall(layout: &GapLayout) -> u64 {
    let content = layout.estimated_content_extent.unwrap_or(0);
    (layout.viewport_extent.max(0) as u64).saturating_sub(content)
}
