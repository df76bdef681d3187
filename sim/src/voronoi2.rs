use std::f64::consts::TAU;

// Animated 2D cell-distance noise. Every lattice cell owns one feature point
// drifting inside it on its own phase; a sample is the distance to the
// nearest feature point in the 3×3 neighborhood, clamped to [0, 1].
pub struct Voronoi2D {
    perm: [u8; 512],
}

impl Voronoi2D {
    pub fn new(seed: u64) -> Self {
        // permutation-table construction shared with the gradient noises
        let mut p: Vec<u8> = (0..256).map(|i| i as u8).collect();
        let mut x = seed ^ 0x9E37_79B9_7F4A_7C15_u64;
        let mut rng = || {
            x ^= x << 13;
            x ^= x >> 7;
            x ^= x << 17;
            (x & 0xFF) as u8
        };
        for i in (1..256).rev() {
            let j = (rng() as usize) % (i + 1);
            p.swap(i, j);
        }
        let mut perm = [0u8; 512];
        for i in 0..512 {
            perm[i] = p[i & 255];
        }

        Self { perm }
    }

    // Per-cell hash in [0, 1]; `channel` decouples the two axes
    #[inline]
    fn cell_hash(&self, cx: i64, cy: i64, channel: usize) -> f64 {
        let xi = (cx & 255) as usize;
        let yi = (cy & 255) as usize;
        let h = self.perm[(self.perm[(xi + channel) & 255] as usize + yi) & 255];
        h as f64 / 255.0
    }

    // Distance to the nearest animated feature point. Each point oscillates
    // around its cell center with a phase from the cell hash, so the pattern
    // shimmers in place rather than scrolling.
    pub fn sample(&self, x: f64, y: f64, time: f64) -> f64 {
        let cx = x.floor() as i64;
        let cy = y.floor() as i64;
        let fx = x - cx as f64;
        let fy = y - cy as f64;

        let mut min_dist = f64::MAX;
        for oy in -1..=1_i64 {
            for ox in -1..=1_i64 {
                let hx = self.cell_hash(cx + ox, cy + oy, 0);
                let hy = self.cell_hash(cx + ox, cy + oy, 1);
                // feature point stays inside its own cell
                let px = ox as f64 + 0.5 + 0.5 * (time + hx * TAU).sin();
                let py = oy as f64 + 0.5 + 0.5 * (time + hy * TAU).sin();
                let dx = px - fx;
                let dy = py - fy;
                let dist = (dx * dx + dy * dy).sqrt();
                if dist < min_dist {
                    min_dist = dist;
                }
            }
        }

        min_dist.min(1.0)
    }
}
