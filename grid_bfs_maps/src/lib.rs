use grid_util::point::Point;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Attempts at drawing a free start or end cell before scanning for one.
const MAX_DRAWS: usize = 100;

/// A square map with rectangular obstacles and free, distinct start and end cells.
#[derive(Clone, Debug)]
pub struct RandomMap {
    pub size: usize,
    /// Obstacles as `(x, y, width, height)`, possibly sticking out of the map.
    pub rects: Vec<(i32, i32, i32, i32)>,
    pub start: Point,
    pub end: Point,
}

impl RandomMap {
    /// Places `obstacle_num` rectangles with sides between 2 and a third of the map size
    /// at uniformly random positions, then draws a free start and a free end distinct from
    /// it. Returns [None] if the obstacles leave fewer than two free cells.
    pub fn generate<R: Rng>(size: usize, obstacle_num: usize, rng: &mut R) -> Option<RandomMap> {
        if size == 0 {
            return None;
        }
        let n = size as i32;
        let side_limit = (n / 3).max(3);
        let rects = (0..obstacle_num)
            .map(|_| {
                let w = rng.gen_range(2..side_limit);
                let h = rng.gen_range(2..side_limit);
                (rng.gen_range(0..n), rng.gen_range(0..n), w, h)
            })
            .collect();
        let mut map = RandomMap {
            size,
            rects,
            start: Point::new(0, 0),
            end: Point::new(0, 0),
        };
        map.start = map.draw_free(rng, None)?;
        map.end = map.draw_free(rng, Some(map.start))?;
        Some(map)
    }

    /// Whether `p` is covered by one of the rectangles.
    pub fn is_blocked(&self, p: &Point) -> bool {
        self.rects
            .iter()
            .any(|&(x, y, w, h)| p.x >= x && p.x < x + w && p.y >= y && p.y < y + h)
    }

    /// The cells covered by the rectangles that lie on the map, in row-major order.
    pub fn obstacle_points(&self) -> Vec<Point> {
        let n = self.size as i32;
        (0..n)
            .flat_map(|y| (0..n).map(move |x| Point::new(x, y)))
            .filter(|p| self.is_blocked(p))
            .collect()
    }

    fn draw_free<R: Rng>(&self, rng: &mut R, exclude: Option<Point>) -> Option<Point> {
        let n = self.size as i32;
        let usable = |p: &Point| !self.is_blocked(p) && Some(*p) != exclude;
        for _ in 0..MAX_DRAWS {
            let p = Point::new(rng.gen_range(0..n), rng.gen_range(0..n));
            if usable(&p) {
                return Some(p);
            }
        }
        (0..n)
            .flat_map(|y| (0..n).map(move |x| Point::new(x, y)))
            .find(|p| usable(p))
    }
}

/// Generates `count` maps from a fixed seed, skipping draws without room for a start and
/// an end.
pub fn get_maps(count: usize, size: usize, obstacle_num: usize, seed: u64) -> Vec<RandomMap> {
    assert!(size >= 2, "a {size}x{size} map has no room for a start and an end");
    let mut rng = StdRng::seed_from_u64(seed);
    let mut maps = Vec::with_capacity(count);
    while maps.len() < count {
        if let Some(map) = RandomMap::generate(size, obstacle_num, &mut rng) {
            maps.push(map);
        }
    }
    maps
}
