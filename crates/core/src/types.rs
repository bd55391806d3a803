#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pos {
    pub y: i32,
    pub x: i32,
}

impl Pos {
    pub fn chebyshev(self, other: Pos) -> u32 {
        self.x.abs_diff(other.x).max(self.y.abs_diff(other.y))
    }
}

pub const SURFACE_LAYER_COUNT: usize = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SurfaceLayer {
    Floor,
    Wall,
    Exterior,
}

impl SurfaceLayer {
    pub const ALL: [SurfaceLayer; SURFACE_LAYER_COUNT] =
        [SurfaceLayer::Floor, SurfaceLayer::Wall, SurfaceLayer::Exterior];

    pub fn index(self) -> usize {
        match self {
            SurfaceLayer::Floor => 0,
            SurfaceLayer::Wall => 1,
            SurfaceLayer::Exterior => 2,
        }
    }

    /// One-hot blend weights selecting only this layer.
    pub fn weights(self) -> [f32; SURFACE_LAYER_COUNT] {
        let mut weights = [0.0; SURFACE_LAYER_COUNT];
        weights[self.index()] = 1.0;
        weights
    }

    /// Layer carrying the largest weight; ties resolve to the lowest index.
    pub fn dominant(weights: &[f32; SURFACE_LAYER_COUNT]) -> SurfaceLayer {
        let mut best = SurfaceLayer::Floor;
        for layer in SurfaceLayer::ALL {
            if weights[layer.index()] > weights[best.index()] {
                best = layer;
            }
        }
        best
    }
}
