//! Column layout for the overlay renderer.
//!
//! Distributes a fixed pixel budget across display columns declared in a
//! fixed order. Every fixed column reserves its measured text width plus
//! padding on both sides; the single flexible column (declared with a
//! measured width of zero) absorbs whatever is left. The renderer looks up
//! each column's span by id after layout.
//!
//! The algorithm is pure and stateless between [`ColumnLayout::layout`]
//! calls: the same declarations and the same available width always produce
//! the same geometry.

use thiserror::Error;

/// Layout failures.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum LayoutError {
    /// Fixed reservations exceed the available width. The geometry is still
    /// produced with the flexible column clamped to zero width; callers log
    /// and carry on.
    #[error("fixed columns need {required} px but only {available} px are available")]
    Overflow {
        /// Total width reserved by fixed columns, including padding.
        required: f32,
        /// Width the caller had to distribute.
        available: f32,
    },

    /// A column id was declared twice.
    #[error("column {0} declared twice")]
    DuplicateColumn(u32),

    /// A second flexible column was declared; exactly one may have a
    /// measured width of zero.
    #[error("column {0} is a second flexible column")]
    MultipleFlexible(u32),
}

/// Horizontal extent of one laid-out column.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ColumnSpan {
    /// Cell left edge.
    pub left: f32,
    /// Cell right edge.
    pub right: f32,
    /// Text left edge (cell left plus padding).
    pub text_left: f32,
    /// Text right edge (cell right minus padding).
    pub text_right: f32,
}

impl ColumnSpan {
    /// Full cell width including padding.
    pub fn width(&self) -> f32 {
        self.right - self.left
    }
}

#[derive(Debug, Clone, Copy)]
struct ColumnSlot {
    id: u32,
    measured_width: f32,
    padding: f32,
    span: ColumnSpan,
}

impl ColumnSlot {
    fn is_flexible(&self) -> bool {
        self.measured_width == 0.0
    }

    fn reserved(&self) -> f32 {
        self.measured_width + 2.0 * self.padding
    }
}

/// Declared columns plus their computed geometry.
#[derive(Debug, Clone, Default)]
pub struct ColumnLayout {
    columns: Vec<ColumnSlot>,
}

impl ColumnLayout {
    /// Empty layout; equivalent to [`ColumnLayout::reset`] on an existing
    /// one.
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop all declared columns, e.g. when the font or config changed and
    /// widths must be re-measured.
    pub fn reset(&mut self) {
        self.columns.clear();
    }

    /// Declare the next column.
    ///
    /// `measured_width` is the text width the renderer measured for the
    /// column's widest content; zero marks the single flexible column.
    /// `padding` is reserved on both sides of the text.
    ///
    /// # Errors
    ///
    /// [`LayoutError::DuplicateColumn`] when `id` was already declared,
    /// [`LayoutError::MultipleFlexible`] on a second zero-width column.
    pub fn push(&mut self, id: u32, measured_width: f32, padding: f32) -> Result<(), LayoutError> {
        if self.columns.iter().any(|c| c.id == id) {
            return Err(LayoutError::DuplicateColumn(id));
        }
        if measured_width == 0.0 && self.columns.iter().any(ColumnSlot::is_flexible) {
            return Err(LayoutError::MultipleFlexible(id));
        }

        self.columns.push(ColumnSlot {
            id,
            measured_width,
            padding,
            span: ColumnSpan::default(),
        });
        Ok(())
    }

    /// Distribute `available` pixels across the declared columns.
    ///
    /// Idempotent: recomputes all spans from the declarations alone.
    ///
    /// # Errors
    ///
    /// [`LayoutError::Overflow`] when fixed reservations exceed `available`;
    /// the clamped geometry (flexible column at zero width) is still stored
    /// and queryable.
    pub fn layout(&mut self, available: f32) -> Result<(), LayoutError> {
        let required: f32 = self
            .columns
            .iter()
            .filter(|c| !c.is_flexible())
            .map(ColumnSlot::reserved)
            .sum();

        // Never negative: the flexible column clamps to zero on overflow.
        let flexible_width = (available - required).max(0.0);

        let mut x = 0.0;
        for column in &mut self.columns {
            let cell = if column.is_flexible() {
                flexible_width
            } else {
                column.reserved()
            };

            let text_left = x + column.padding;
            let text_right = (x + cell - column.padding).max(text_left);
            column.span = ColumnSpan {
                left: x,
                right: x + cell,
                text_left,
                text_right,
            };
            x += cell;
        }

        if required > available {
            return Err(LayoutError::Overflow {
                required,
                available,
            });
        }
        Ok(())
    }

    /// Span of a column by id, in declaration order geometry.
    pub fn get(&self, id: u32) -> Option<ColumnSpan> {
        self.columns.iter().find(|c| c.id == id).map(|c| c.span)
    }

    /// Declared column ids in declaration order.
    pub fn ids(&self) -> impl Iterator<Item = u32> + '_ {
        self.columns.iter().map(|c| c.id)
    }
}
