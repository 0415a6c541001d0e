// Copyright (c) 2022 Bastiaan Marinus van de Weerd

use std::fmt::Debug;


macro_rules! days { ( $( $day:literal ),+ $(,)? ) => { paste::paste! {
	$( mod [<day $day>]; )+

	fn solve(day: u8, input: &str) -> Result<[String; 2], MainError> {
		fn solve_err(e: impl Debug + 'static) -> MainError { MainError::Solve(Box::new(e)) }
		match day {
			$( $day => Ok([
				[<day $day>]::part1(input).map_err(solve_err)?.to_string(),
				[<day $day>]::part2(input).map_err(solve_err)?.to_string(),
			]), )+
			day => Err(MainError::UnknownDay(day)),
		}
	}
} } }

days!(06);


#[allow(dead_code)]
#[derive(Debug)]
enum MainError {
	Usage,
	Day(std::num::ParseIntError),
	UnknownDay(u8),
	Input { path: String, source: std::io::Error },
	Solve(Box<dyn Debug>),
}

fn main() -> Result<(), MainError> {
	let mut args = std::env::args().skip(1);
	let day = args.next()
		.ok_or(MainError::Usage)?
		.parse::<u8>()
		.map_err(MainError::Day)?;
	let path = args.next().unwrap_or_else(|| format!("input/day{day:02}.txt"));
	let input = std::fs::read_to_string(&path)
		.map_err(|source| MainError::Input { path, source })?;

	let [part1, part2] = solve(day, &input)?;
	println!("Day {day}, part 1: {part1}");
	println!("Day {day}, part 2: {part2}");
	Ok(())
}
