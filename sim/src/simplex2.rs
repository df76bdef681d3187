use crate::NoiseBasis;

// 2D Simplex noise basis, after Ken Perlin's simplex scheme. Simplex divides
// space into triangles rather than squares, which gives better isotropy.
pub struct Simplex2D {
    perm: [u8; 512],
    grad3: [(i8, i8); 12],
}

impl Simplex2D {
    pub fn new(seed: u64) -> Self {
        // same permutation-table construction as Perlin2D
        let mut p: Vec<u8> = (0..256).map(|i| i as u8).collect();
        let mut x = seed ^ 0x1234_5678_9ABC_DEF0_u64;
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

        // predefined gradient directions (length ≈ 1)
        let grad3 = [
            (1, 1),
            (-1, 1),
            (1, -1),
            (-1, -1),
            (1, 0),
            (-1, 0),
            (0, 1),
            (0, -1),
            (1, 2),
            (-1, 2),
            (1, -2),
            (-1, -2),
        ];

        Self { perm, grad3 }
    }

    #[inline]
    fn dot(g: (i8, i8), x: f64, y: f64) -> f64 {
        (g.0 as f64) * x + (g.1 as f64) * y
    }
}

impl NoiseBasis for Simplex2D {
    // Raw single-octave simplex noise at (x, y), range roughly [−1, +1]
    fn noise2(&self, xin: f64, yin: f64) -> f64 {
        const SQRT_3: f64 = 1.732_050_807_568_877_293_5;
        // skewing/unskewing factors for 2D
        const F2: f64 = 0.5 * (SQRT_3 - 1.0);
        const G2: f64 = (3.0 - SQRT_3) / 6.0;

        // skew input space to find the simplex cell
        let s = (xin + yin) * F2;
        let i = (xin + s).floor() as i32;
        let j = (yin + s).floor() as i32;

        // unskew back to get the offset from the cell origin
        let t = (i + j) as f64 * G2;
        let x0 = xin - (i as f64 - t);
        let y0 = yin - (j as f64 - t);

        // which of the two triangles are we in
        let (i1, j1) = if x0 > y0 { (1, 0) } else { (0, 1) };

        // offsets for the remaining corners
        let x1 = x0 - i1 as f64 + G2;
        let y1 = y0 - j1 as f64 + G2;
        let x2 = x0 - 1.0 + 2.0 * G2;
        let y2 = y0 - 1.0 + 2.0 * G2;

        // hash the three corners
        let ii = (i & 255) as usize;
        let jj = (j & 255) as usize;
        let gi0 = (self.perm[ii + self.perm[jj] as usize] as usize) % 12;
        let gi1 = (self.perm[ii + i1 + self.perm[jj + j1] as usize] as usize) % 12;
        let gi2 = (self.perm[ii + 1 + self.perm[jj + 1] as usize] as usize) % 12;

        // corner contributions inside their circular falloff
        let mut n0 = 0.0;
        let t0 = 0.5 - x0 * x0 - y0 * y0;
        if t0 > 0.0 {
            let t0_sq = t0 * t0;
            n0 = t0_sq * t0_sq * Self::dot(self.grad3[gi0], x0, y0);
        }
        let mut n1 = 0.0;
        let t1 = 0.5 - x1 * x1 - y1 * y1;
        if t1 > 0.0 {
            let t1_sq = t1 * t1;
            n1 = t1_sq * t1_sq * Self::dot(self.grad3[gi1], x1, y1);
        }
        let mut n2 = 0.0;
        let t2 = 0.5 - x2 * x2 - y2 * y2;
        if t2 > 0.0 {
            let t2_sq = t2 * t2;
            n2 = t2_sq * t2_sq * Self::dot(self.grad3[gi2], x2, y2);
        }

        // scale so the result sits roughly in [-1, 1]
        70.0 * (n0 + n1 + n2)
    }
}
