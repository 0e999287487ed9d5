/// Screen-space translation handed into every draw call.
///
/// The renderer only needs translation today; concatenation keeps the
/// call sites shaped for a full affine matrix later.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Transform {
    pub tx: f32,
    pub ty: f32,
}

impl Transform {
    pub fn translate(tx: f32, ty: f32) -> Self {
        Self { tx, ty }
    }

    pub fn concat(self, other: Transform) -> Self {
        Self {
            tx: self.tx + other.tx,
            ty: self.ty + other.ty,
        }
    }

    pub fn apply(self, x: f32, y: f32) -> (f32, f32) {
        (x + self.tx, y + self.ty)
    }

    /// Maps a screen-space point back into this transform's local space.
    pub fn unapply(self, x: f32, y: f32) -> (f32, f32) {
        (x - self.tx, y - self.ty)
    }
}
