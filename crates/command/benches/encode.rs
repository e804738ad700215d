//! Performance benchmarks for command argument encoding

use std::hint::black_box;

use bytes::Bytes;
use command::Arg;
use command::geo;
use command::geo::GeoBy;
use command::geo::GeoEntry;
use command::geo::GeoFrom;
use command::geo::GeoSearchOptions;
use command::geo::GeoSort;
use command::geo::GeoUnit;
use command::set;
use criterion::{Criterion, criterion_group, criterion_main};

fn bench_encode_sadd(c: &mut Criterion) {
	let mut group = c.benchmark_group("encode_sadd");

	group.bench_function("ten_members", |b| {
		b.iter(|| {
			let members: Vec<Arg> = (0..10).map(|i| Arg::from(i as i64)).collect();
			set::sadd(black_box(Bytes::from_static(b"bench")), members).unwrap()
		})
	});
	group.finish();
}

fn bench_encode_geoadd(c: &mut Criterion) {
	let mut group = c.benchmark_group("encode_geoadd");

	group.bench_function("two_triplets", |b| {
		b.iter(|| {
			geo::geoadd(
				black_box(Bytes::from_static(b"pts")),
				vec![
					GeoEntry::new(13.361389, 38.115556, "Palermo"),
					GeoEntry::new(15.087269, 37.502669, "Catania"),
				],
			)
			.unwrap()
		})
	});
	group.finish();
}

fn bench_encode_geosearch(c: &mut Criterion) {
	let mut group = c.benchmark_group("encode_geosearch");
	let opts = GeoSearchOptions::new()
		.with_coord()
		.with_dist()
		.with_hash()
		.count(100)
		.any()
		.sort(GeoSort::Asc);

	group.bench_function("all_options", |b| {
		b.iter(|| {
			geo::geosearch(
				black_box(Bytes::from_static(b"pts")),
				GeoFrom::LonLat(15.0, 37.0),
				GeoBy::Box {
					width: 400.0,
					height: 200.0,
				},
				GeoUnit::Kilometers,
				&opts,
			)
			.unwrap()
		})
	});
	group.finish();
}

criterion_group!(
	benches,
	bench_encode_sadd,
	bench_encode_geoadd,
	bench_encode_geosearch
);
criterion_main!(benches);
