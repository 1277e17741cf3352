use crate::config::FadeConfig;
use crate::constants::{
    FADE_CEILING, HORIZONTAL_SCROLL, PLANE_HEIGHT, PLANE_WIDTH, SPRITE_SNAPSHOT_SIZE,
    STANDARD_HEIGHT, STANDARD_WIDTH,
};

/// A full-size grid indexed as [y][x]
pub type Grid<T> = [[T; PLANE_WIDTH]; PLANE_HEIGHT];

/// The most recently drawn sprite, indexed as [row][column]
pub type SpriteSnapshot = [[bool; SPRITE_SNAPSHOT_SIZE]; SPRITE_SNAPSHOT_SIZE];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Plane {
    A,
    B,
}

impl Plane {
    fn index(self) -> usize {
        match self {
            Plane::A => 0,
            Plane::B => 1,
        }
    }
}

/// Which planes draw, clear and scroll operations apply to.
///
/// Numeric selectors are read as bit flags: bit 0 is plane A, bit 1 is plane B.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaneSelector {
    None,
    A,
    B,
    Both,
}

impl PlaneSelector {
    /// Only the low two bits are meaningful; anything above them is ignored
    pub fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            0b00 => PlaneSelector::None,
            0b01 => PlaneSelector::A,
            0b10 => PlaneSelector::B,
            _ => PlaneSelector::Both,
        }
    }

    pub fn bits(self) -> u8 {
        match self {
            PlaneSelector::None => 0b00,
            PlaneSelector::A => 0b01,
            PlaneSelector::B => 0b10,
            PlaneSelector::Both => 0b11,
        }
    }

    /// Selected planes, plane A first
    pub fn planes(self) -> &'static [Plane] {
        match self {
            PlaneSelector::None => &[],
            PlaneSelector::A => &[Plane::A],
            PlaneSelector::B => &[Plane::B],
            PlaneSelector::Both => &[Plane::A, Plane::B],
        }
    }
}

impl Default for PlaneSelector {
    fn default() -> Self {
        PlaneSelector::A
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// 64x32
    Standard,
    /// 128x64
    Extended,
}

impl Resolution {
    pub fn width(self) -> usize {
        match self {
            Resolution::Standard => STANDARD_WIDTH,
            Resolution::Extended => PLANE_WIDTH,
        }
    }

    pub fn height(self) -> usize {
        match self {
            Resolution::Standard => STANDARD_HEIGHT,
            Resolution::Extended => PLANE_HEIGHT,
        }
    }

    /// Scroll distances are given in extended resolution cells
    pub fn scale(self, n: usize) -> usize {
        match self {
            Resolution::Standard => n / 2,
            Resolution::Extended => n,
        }
    }
}

impl Default for Resolution {
    fn default() -> Self {
        Resolution::Standard
    }
}

/// # PixelManager
/// Two independently addressable 128x64 planes plus the bookkeeping around them.
///
/// - `resolution` decides the active area; sprites wrap and scrolls shift within it
/// - `selector` decides which planes draw, clear and scroll operations touch
/// - `fade` holds a decaying intensity for every recently erased pixel. It only exists so a
///   renderer can smooth out flicker and is never read back by instructions.
///
/// Every pixel change goes through `draw`, so erasing by any route (sprite collision, clear,
/// scroll) seeds the fade grid the same way.
#[derive(Clone)]
pub struct PixelManager {
    planes: Box<[Grid<bool>; 2]>,
    fade: Box<Grid<f32>>,
    resolution: Resolution,
    selector: PlaneSelector,
    fade_config: FadeConfig,
    last_sprite: SpriteSnapshot,
}

impl PixelManager {
    pub fn new(fade_config: FadeConfig) -> Self {
        PixelManager {
            planes: Box::new([[[false; PLANE_WIDTH]; PLANE_HEIGHT]; 2]),
            fade: Box::new([[0.0; PLANE_WIDTH]; PLANE_HEIGHT]),
            resolution: Resolution::default(),
            selector: PlaneSelector::default(),
            fade_config,
            last_sprite: [[false; SPRITE_SNAPSHOT_SIZE]; SPRITE_SNAPSHOT_SIZE],
        }
    }

    /// Width of the active area
    pub fn width(&self) -> usize {
        self.resolution.width()
    }

    /// Height of the active area
    pub fn height(&self) -> usize {
        self.resolution.height()
    }

    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    pub fn set_resolution(&mut self, resolution: Resolution) {
        self.resolution = resolution;
    }

    pub fn selector(&self) -> PlaneSelector {
        self.selector
    }

    pub fn set_selector(&mut self, selector: PlaneSelector) {
        self.selector = selector;
    }

    pub fn fade_config(&self) -> FadeConfig {
        self.fade_config
    }

    pub fn set_fade_config(&mut self, fade_config: FadeConfig) {
        self.fade_config = fade_config;
    }

    pub fn plane(&self, plane: Plane) -> &Grid<bool> {
        &self.planes[plane.index()]
    }

    pub fn pixel(&self, x: usize, y: usize, plane: Plane) -> bool {
        self.planes[plane.index()][y % PLANE_HEIGHT][x % PLANE_WIDTH]
    }

    pub fn fade_grid(&self) -> &Grid<f32> {
        &self.fade
    }

    pub fn fade(&self, x: usize, y: usize) -> f32 {
        self.fade[y % PLANE_HEIGHT][x % PLANE_WIDTH]
    }

    pub fn last_sprite(&self) -> &SpriteSnapshot {
        &self.last_sprite
    }

    /// Toggles a single pixel.
    ///
    /// Returns true if the pixel was on beforehand, i.e. this toggle erased it.
    pub fn draw(&mut self, x: usize, y: usize, plane: Plane) -> bool {
        let (x, y) = (x % PLANE_WIDTH, y % PLANE_HEIGHT);
        let was_on = self.planes[plane.index()][y][x];
        if was_on && self.fade_config.enabled {
            self.fade[y][x] = FADE_CEILING;
        }
        self.planes[plane.index()][y][x] = !was_on;
        was_on
    }

    /// Turns a pixel off if it is on; returns whether anything was erased
    pub fn erase(&mut self, x: usize, y: usize, plane: Plane) -> bool {
        if self.pixel(x, y, plane) {
            self.draw(x, y, plane)
        } else {
            false
        }
    }

    /// Erases every lit pixel on both planes
    pub fn clear(&mut self) {
        for &plane in PlaneSelector::Both.planes() {
            for y in 0..PLANE_HEIGHT {
                for x in 0..PLANE_WIDTH {
                    self.erase(x, y, plane);
                }
            }
        }
    }

    /// XORs an 8 pixel wide sprite onto `plane` at (x, y), wrapping around the active area.
    ///
    /// Returns true if any lit pixel was erased.
    pub fn draw_sprite(&mut self, x: usize, y: usize, rows: &[u8], plane: Plane) -> bool {
        self.snapshot(rows);
        let (width, height) = (self.width(), self.height());
        let mut collision = false;
        for (row, byte) in rows.iter().enumerate() {
            let py = (y + row) % height;
            for bit in 0..8 {
                if (byte >> (7 - bit)) & 1 == 1 {
                    collision |= self.draw((x + bit) % width, py, plane);
                }
            }
        }
        collision
    }

    fn snapshot(&mut self, rows: &[u8]) {
        self.last_sprite = [[false; SPRITE_SNAPSHOT_SIZE]; SPRITE_SNAPSHOT_SIZE];
        for (row, byte) in rows.iter().take(SPRITE_SNAPSHOT_SIZE).enumerate() {
            for bit in 0..8 {
                self.last_sprite[row][bit] = (byte >> (7 - bit)) & 1 == 1;
            }
        }
    }

    pub fn scroll_up(&mut self, n: usize) {
        let n = self.resolution.scale(n) as isize;
        self.scroll(0, -n);
    }

    pub fn scroll_down(&mut self, n: usize) {
        let n = self.resolution.scale(n) as isize;
        self.scroll(0, n);
    }

    pub fn scroll_left(&mut self) {
        let n = self.resolution.scale(HORIZONTAL_SCROLL) as isize;
        self.scroll(-n, 0);
    }

    pub fn scroll_right(&mut self) {
        let n = self.resolution.scale(HORIZONTAL_SCROLL) as isize;
        self.scroll(n, 0);
    }

    fn scroll(&mut self, dx: isize, dy: isize) {
        for &plane in self.selector.planes() {
            self.shift(plane, dx, dy);
        }
    }

    /// Moves the active area of one plane by (dx, dy).
    ///
    /// Cells are only toggled where the old and new contents differ, so every pixel that ends
    /// up off after being on passes through `draw` and fades.
    fn shift(&mut self, plane: Plane, dx: isize, dy: isize) {
        let before: Grid<bool> = self.planes[plane.index()];
        let (width, height) = (self.width() as isize, self.height() as isize);
        for y in 0..height {
            for x in 0..width {
                let (sx, sy) = (x - dx, y - dy);
                let incoming = sx >= 0
                    && sy >= 0
                    && sx < width
                    && sy < height
                    && before[sy as usize][sx as usize];
                if incoming != before[y as usize][x as usize] {
                    self.draw(x as usize, y as usize, plane);
                }
            }
        }
    }

    /// Decays every fading pixel by the configured speed, stopping at 0
    pub fn tick_fade(&mut self) {
        let speed = self.fade_config.speed;
        for cell in self.fade.iter_mut().flat_map(|row| row.iter_mut()) {
            if *cell > 0.0 {
                *cell = (*cell - speed).max(0.0);
            }
        }
    }
}

impl Default for PixelManager {
    fn default() -> Self {
        Self::new(FadeConfig::default())
    }
}
