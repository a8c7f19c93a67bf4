use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use narrow_float::{
  bf16_from_f32, bit_distance, decode_bf16, decode_fp8, encode_bf16, encode_fp8, fp8_from_f32, golden_matmul,
  harness::random_values, Matrix, E4M3, E5M2,
};

const LEN: usize = 4096;

fn random_data(seed: u64) -> Vec<f32> {
  random_values(LEN, 100.0, seed).unwrap()
}

// Establish a baseline with a native f32 → f64 → f32 round trip over the same data

fn baseline_fpu_convert(c: &mut Criterion) {
  let data = random_data(0);
  let mut g = c.benchmark_group("baseline_fpu_convert");
  g.throughput(Throughput::Elements(LEN as u64));
  g.bench_function("f32_f64_f32", |b| {
    b.iter(|| black_box(&data).iter().map(|&x| x as f64 as f32).collect::<Vec<_>>());
  });
  g.finish();
}

// Time converting 1 value, for a few representative inputs (normal, tie, subnormal, saturating)

const NUMS: [f32; 4] = [1.3, 1.0625, 0.003, 1e6];

fn encode_one(c: &mut Criterion) {
  let mut g = c.benchmark_group("encode_one");
  for num in NUMS {
    g.throughput(Throughput::Elements(1));
    g.bench_with_input(BenchmarkId::new("bf16", num), &num, |b, &num| {
      b.iter(|| bf16_from_f32(black_box(num)));
    });
    g.bench_with_input(BenchmarkId::new("e4m3", num), &num, |b, &num| {
      b.iter(|| fp8_from_f32(black_box(num), &E4M3));
    });
    g.bench_with_input(BenchmarkId::new("e5m2", num), &num, |b, &num| {
      b.iter(|| fp8_from_f32(black_box(num), &E5M2));
    });
  }
  g.finish();
}

// Time converting LEN values

fn encode_slice(c: &mut Criterion) {
  let data = random_data(1);
  let mut g = c.benchmark_group("encode_slice");
  g.throughput(Throughput::Elements(LEN as u64));
  g.bench_function("bf16", |b| b.iter(|| encode_bf16(black_box(&data))));
  g.bench_function("e4m3", |b| b.iter(|| encode_fp8(black_box(&data), &E4M3)));
  g.bench_function("e5m2", |b| b.iter(|| encode_fp8(black_box(&data), &E5M2)));
  g.finish();
}

fn decode_slice(c: &mut Criterion) {
  let data = random_data(2);
  let bf16 = encode_bf16(&data);
  let e4m3 = encode_fp8(&data, &E4M3);
  let e5m2 = encode_fp8(&data, &E5M2);
  let mut g = c.benchmark_group("decode_slice");
  g.throughput(Throughput::Elements(LEN as u64));
  g.bench_function("bf16", |b| b.iter(|| decode_bf16(black_box(&bf16))));
  g.bench_function("e4m3", |b| b.iter(|| decode_fp8(black_box(&e4m3), &E4M3)));
  g.bench_function("e5m2", |b| b.iter(|| decode_fp8(black_box(&e5m2), &E5M2)));
  g.finish();
}

// Time the comparison side: the ulp metric and the golden product

fn compare(c: &mut Criterion) {
  let reference = random_data(3);
  let candidate = decode_fp8(&encode_fp8(&reference, &E4M3), &E4M3);
  let mut g = c.benchmark_group("compare");
  g.throughput(Throughput::Elements(LEN as u64));
  g.bench_function("bit_distance", |b| {
    b.iter(|| bit_distance(black_box(&reference), black_box(&candidate)))
  });
  g.finish();

  let mut g = c.benchmark_group("golden_matmul");
  for n in [8, 16, 64] {
    let a = Matrix::from_fn(n, n, |i, j| (i as f32 - j as f32) / 8.0);
    g.throughput(Throughput::Elements((n * n * n) as u64));
    g.bench_with_input(BenchmarkId::from_parameter(format_args!("{n}x{n}")), &a, |b, a| {
      b.iter(|| golden_matmul(black_box(a), black_box(a)));
    });
  }
  g.finish();
}

criterion_group!(baseline_fpu,
  baseline_fpu_convert,
);

criterion_group!(encode,
  encode_one,
  encode_slice,
);

criterion_group!(decode,
  decode_slice,
);

criterion_group!(comparison,
  compare,
);

criterion_main!(baseline_fpu, encode, decode, comparison);
