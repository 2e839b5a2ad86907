use coordinate_processor::models::{Datum, DatumSpec, Hemisphere, InputRepresentation, RawRecord};
use coordinate_processor::processors::CoordinateProcessor;
use coordinate_processor::utils::{format_dms, parse_dms, Axis};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

// Points spread over Java and Kalimantan
fn create_dd_rows(count: usize) -> Vec<(f64, f64)> {
    (0..count)
        .map(|i| {
            let lon = 105.0 + (i % 1000) as f64 * 0.011;
            let lat = -8.0 + (i % 700) as f64 * 0.013;
            (lon, lat)
        })
        .collect()
}

fn to_rows(points: &[(f64, f64)], render: impl Fn(f64, f64) -> (String, String)) -> Vec<RawRecord> {
    points
        .iter()
        .enumerate()
        .map(|(i, &(lon, lat))| {
            let (x, y) = render(lon, lat);
            RawRecord::new()
                .with_field("x", x)
                .with_field("y", y)
                .with_field("id", i.to_string())
        })
        .collect()
}

fn benchmark_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");

    for size in [1_000, 10_000] {
        let points = create_dd_rows(size);

        let dd_rows = to_rows(&points, |lon, lat| (lon.to_string(), lat.to_string()));
        let dms_rows = to_rows(&points, |lon, lat| {
            (format_dms(lon, Axis::Lon), format_dms(lat, Axis::Lat))
        });

        let (projected, _) = CoordinateProcessor::new(InputRepresentation::DecimalDegrees)
            .process(&dd_rows, None)
            .expect("benchmark input converts");
        let utm_rows: Vec<RawRecord> = projected
            .iter()
            .filter(|r| r.zone_utm() == Some("48S"))
            .map(|r| {
                RawRecord::new()
                    .with_field("x", r.easting_utm().unwrap_or_default())
                    .with_field("y", r.northing_utm().unwrap_or_default())
            })
            .collect();
        let utm_spec = DatumSpec::new(Datum::Dgn95, 48, Hemisphere::South);

        group.bench_with_input(BenchmarkId::new("decimal_degrees", size), &dd_rows, |b, rows| {
            let processor = CoordinateProcessor::new(InputRepresentation::DecimalDegrees);
            b.iter(|| processor.process(black_box(rows), None))
        });

        group.bench_with_input(BenchmarkId::new("dms", size), &dms_rows, |b, rows| {
            let processor = CoordinateProcessor::new(InputRepresentation::Dms);
            b.iter(|| processor.process(black_box(rows), None))
        });

        group.bench_with_input(BenchmarkId::new("utm_dgn95", size), &utm_rows, |b, rows| {
            let processor = CoordinateProcessor::new(InputRepresentation::Utm)
                .with_datum_spec(Some(utm_spec));
            b.iter(|| processor.process(black_box(rows), None))
        });

        group.bench_with_input(
            BenchmarkId::new("decimal_degrees_parallel", size),
            &dd_rows,
            |b, rows| {
                let processor = CoordinateProcessor::new(InputRepresentation::DecimalDegrees)
                    .with_max_workers(num_cpus::get());
                b.iter(|| processor.process(black_box(rows), None))
            },
        );
    }

    group.finish();
}

fn benchmark_dms_parsing(c: &mut Criterion) {
    let samples = [
        "6 10 30 LS",
        "106 49 37 BT",
        "6°10'30.5\"S",
        "106° 49' 37.123\" E",
        "-7 15",
    ];

    c.bench_function("parse_dms", |b| {
        b.iter(|| {
            for sample in &samples {
                let _ = black_box(parse_dms(black_box(sample)));
            }
        })
    });
}

criterion_group!(benches, benchmark_pipeline, benchmark_dms_parsing);
criterion_main!(benches);
