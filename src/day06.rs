// Copyright (c) 2022 Bastiaan Marinus van de Weerd

use std::collections::HashSet;


#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Heading { Up, Right, Down, Left }

impl Heading {
	const CLOCKWISE: [Heading; 4] = [Heading::Up, Heading::Right, Heading::Down, Heading::Left];

	fn turn(&mut self) {
		*self = Self::CLOCKWISE[(*self as usize + 1) % Self::CLOCKWISE.len()]
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct Guard { pos: usize, heading: Heading }

/// Row-major; `start` is where the guard stands, facing [`Heading::Up`].
pub(crate) struct Map {
	obstacles: Vec<bool>,
	width: usize,
	start: usize,
}

/// The guard walks in circles; holds the first state seen twice.
#[allow(dead_code)]
#[derive(Debug)]
pub(crate) struct CycleDetected(Guard);

struct Visited {
	cells: Vec<bool>,
	count: usize,
}

impl Visited {
	fn new(len: usize) -> Self {
		Visited { cells: vec![false; len], count: 0 }
	}

	fn mark(&mut self, pos: usize) {
		if !std::mem::replace(&mut self.cells[pos], true) { self.count += 1 }
	}

	fn positions(&self) -> impl Iterator<Item = usize> + '_ {
		use itertools::Itertools as _;
		self.cells.iter().positions(|&v| v)
	}
}

impl Map {
	fn step(&self, pos: usize, heading: Heading) -> Option<usize> {
		use Heading::*;
		let w = self.width;
		match heading {
			Up => pos.checked_sub(w),
			Right => (pos % w < w - 1).then(|| pos + 1),
			Down => (pos + w < self.obstacles.len()).then(|| pos + w),
			Left => (pos % w > 0).then(|| pos - 1),
		}
	}

	/// Walks `guard` straight ahead, calling `visit` with every cell it enters.
	/// Returns `true` after turning in front of an obstacle, or `false` once
	/// the next step would leave the map.
	fn walk(&self, guard: &mut Guard, extra_obstacle: Option<usize>, mut visit: impl FnMut(usize)) -> bool {
		while let Some(next) = self.step(guard.pos, guard.heading) {
			if self.obstacles[next] || extra_obstacle == Some(next) {
				guard.heading.turn();
				return true
			}
			guard.pos = next;
			visit(next);
		}
		false
	}

	fn patrol(&self, extra_obstacle: Option<usize>) -> Result<Visited, CycleDetected> {
		let mut visited = Visited::new(self.obstacles.len());
		visited.mark(self.start);

		let mut guard = Guard { pos: self.start, heading: Heading::Up };
		let mut seen = HashSet::new();
		while self.walk(&mut guard, extra_obstacle, |pos| visited.mark(pos)) {
			#[cfg(LOGGING)]
			println!("Turned at {:?} to {:?} ({} visited)", self.pos_rc(guard.pos), guard.heading, visited.count);
			if !seen.insert(guard) { return Err(CycleDetected(guard)) }
		}

		#[cfg(LOGGING)]
		println!("{}", Route(self, &visited));
		Ok(visited)
	}
}


#[allow(dead_code)]
#[derive(Debug)]
pub(crate) enum Error {
	Map(parsing::MapError),
	Loop(CycleDetected),
}

fn input_map_from_str(s: &str) -> Result<Map, Error> {
	s.parse().map_err(Error::Map)
}


fn part1_impl(input_map: &Map) -> Result<usize, CycleDetected> {
	input_map.patrol(None).map(|visited| visited.count)
}

pub(crate) fn part1(s: &str) -> Result<usize, Error> {
	part1_impl(&input_map_from_str(s)?).map_err(Error::Loop)
}


/// Only cells on the unobstructed route can change it; the start is off-limits.
fn part2_impl(input_map: &Map) -> Result<usize, CycleDetected> {
	let route = input_map.patrol(None)?;
	Ok(route.positions()
		.filter(|&pos| pos != input_map.start)
		.filter(|&pos| input_map.patrol(Some(pos)).is_err())
		.count())
}

pub(crate) fn part2(s: &str) -> Result<usize, Error> {
	part2_impl(&input_map_from_str(s)?).map_err(Error::Loop)
}


mod parsing {
	use std::str::FromStr;
	use super::Map;

	#[allow(dead_code)]
	#[derive(Debug)]
	pub(crate) enum MapError {
		Empty,
		Width { line: usize, expected: usize, found: usize },
		MissingGuard,
		ExtraGuard { line: usize, column: usize },
	}

	impl FromStr for Map {
		type Err = MapError;
		fn from_str(s: &str) -> Result<Self, Self::Err> {
			let s = s.trim_end_matches(|c| c == '\n' || c == '\r');
			if s.is_empty() { return Err(MapError::Empty) }
			let width = s.lines().next().map_or(0, |line| line.chars().count());

			let mut obstacles = Vec::new();
			let mut start = None;
			for (l, line) in s.lines().enumerate() {
				let row_start = obstacles.len();
				for (c, chr) in line.chars().enumerate() {
					if chr == '^' && start.replace(obstacles.len()).is_some() {
						return Err(MapError::ExtraGuard { line: l + 1, column: c + 1 })
					}
					obstacles.push(chr == '#');
				}
				match obstacles.len() - row_start {
					found if found != width => return Err(MapError::Width { line: l + 1, expected: width, found }),
					_ => (),
				}
			}

			let start = start.ok_or(MapError::MissingGuard)?;
			Ok(Map { obstacles, width, start })
		}
	}

	#[test]
	fn tests() {
		assert!(matches!("".parse::<Map>(), Err(MapError::Empty)));
		assert!(matches!("\n\n".parse::<Map>(), Err(MapError::Empty)));
		assert!(matches!("\n^".parse::<Map>(), Err(MapError::Width { line: 2, expected: 0, found: 1 })));
		assert!(matches!("...\n.^\n...".parse::<Map>(),
			Err(MapError::Width { line: 2, expected: 3, found: 2 })));
		assert!(matches!("..\n.^.".parse::<Map>(),
			Err(MapError::Width { line: 2, expected: 2, found: 3 })));

		let map = "^.\n..\n\n\n".parse::<Map>().unwrap();
		assert_eq!(map.obstacles.len(), 4);
		assert_eq!(map.start, 0);
		assert!(matches!("...\n.#.".parse::<Map>(), Err(MapError::MissingGuard)));
		assert!(matches!(".^.\n..^".parse::<Map>(), Err(MapError::ExtraGuard { line: 2, column: 3 })));

		let map = "..#\n#^.".parse::<Map>().unwrap();
		assert_eq!(map.width, 3);
		assert_eq!(map.start, 4);
		assert_eq!(map.obstacles, [false, false, true, true, false, false]);
	}
}


#[cfg(LOGGING)]
struct Route<'a>(&'a Map, &'a Visited);

#[cfg(LOGGING)]
impl Map {
	fn pos_rc(&self, pos: usize) -> [usize; 2] {
		[pos / self.width, pos % self.width]
	}
}

#[cfg(LOGGING)]
impl std::fmt::Display for Route<'_> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		use std::fmt::Write;

		let Route(map, visited) = self;
		let height = map.obstacles.len() / map.width;
		for y in 0..height {
			for x in 0..map.width {
				let pos = y * map.width + x;
				f.write_char(
					if pos == map.start { '^' }
					else if map.obstacles[pos] { '#' }
					else if visited.cells[pos] { 'X' }
					else { '.' })?;
			}
			if y < height - 1 { f.write_char('\n')? }
		}
		Ok(())
	}
}


#[cfg(test)]
mod tests {
	use super::*;

	const INPUT: &str = indoc::indoc! { "
		....#.....
		.........#
		..........
		..#.......
		.......#..
		..........
		.#..^.....
		........#.
		#.........
		......#...
	" };

	fn map(s: &str) -> Map {
		input_map_from_str(s).unwrap()
	}

	#[test]
	fn tests() {
		assert_eq!(part1(INPUT).unwrap(), 41);
		assert_eq!(part2(INPUT).unwrap(), 6);
	}

	#[test]
	fn edges() {
		assert_eq!(part1_impl(&map("^")).unwrap(), 1);
		assert_eq!(part2_impl(&map("^")).unwrap(), 0);
		assert_eq!(part1_impl(&map(indoc::indoc! { "
			^..
			...
			...
		" })).unwrap(), 1);
		assert_eq!(part1_impl(&map("..\n^.")).unwrap(), 2);
	}

	#[test]
	fn start_is_never_obstructed() {
		// Blocking the start would trap the guard at (2, 2) between `#`s.
		let map = map(indoc::indoc! { "
			#.#..
			##.#.
			.#^#.
			...#.
			.....
		" });
		assert!(map.patrol(Some(map.start)).is_err());
		assert_eq!(part2_impl(&map).unwrap(), 1);
	}

	#[test]
	fn turns_clockwise() {
		let mut heading = Heading::Up;
		let turns = std::iter::repeat_with(|| { heading.turn(); heading }).take(4).collect::<Vec<_>>();
		assert_eq!(turns, [Heading::Right, Heading::Down, Heading::Left, Heading::Up]);

		let map = map(indoc::indoc! { "
			.#..
			.^..
			....
		" });
		let mut guard = Guard { pos: map.start, heading: Heading::Up };
		let mut entered = vec![];
		assert!(map.walk(&mut guard, None, |pos| entered.push(pos)));
		assert_eq!(guard, Guard { pos: 5, heading: Heading::Right });
		assert!(entered.is_empty());
		assert!(!map.walk(&mut guard, None, |pos| entered.push(pos)));
		assert_eq!(entered, [6, 7]);
		assert_eq!(part1_impl(&map).unwrap(), 3);
	}

	#[test]
	fn visited_grows() {
		let map = map(INPUT);
		let mut visited = Visited::new(map.obstacles.len());
		visited.mark(map.start);
		let mut guard = Guard { pos: map.start, heading: Heading::Up };
		let mut counts = vec![visited.count];
		while map.walk(&mut guard, None, |pos| visited.mark(pos)) {
			counts.push(visited.count);
		}
		counts.push(visited.count);
		assert!(counts[0] >= 1);
		assert!(counts.windows(2).all(|w| w[0] <= w[1]));
		assert_eq!(counts.last(), Some(&41));

		assert_eq!(part1_impl(&map).unwrap(), part1_impl(&map).unwrap());
	}

	#[test]
	fn loops() {
		const CIRCUIT: &str = indoc::indoc! { "
			.#...
			....#
			#^...
			...#.
		" };
		assert!(matches!(part1(CIRCUIT), Err(Error::Loop(CycleDetected(Guard { pos: 6, heading: Heading::Right })))));
		assert!(matches!(part1(".#.\n#^#\n.#."), Err(Error::Loop(_))));
		assert!(matches!(part2(CIRCUIT), Err(Error::Loop(_))));
		assert!(matches!(part1("..\n.."), Err(Error::Map(parsing::MapError::MissingGuard))));

		// Blocked right away, the guard heads east and off the map.
		let map = map(INPUT);
		assert!(map.patrol(Some(map.start - map.width)).is_ok());
	}
}
