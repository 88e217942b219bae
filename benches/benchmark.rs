use criterion::measurement::WallTime;
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use qcsim::config::SimConfig;
use qcsim::gates::{CxVariant, Gate};
use qcsim::operator::{self, Kernel};
use qcsim::runtime::{QuantumState, Session};

// shorter runs than the defaults, the dense kernel gets slow quickly
fn custom_criterion_config() -> Criterion<WallTime> {
    Criterion::default()
        .sample_size(30)
        .measurement_time(std::time::Duration::from_secs(3))
        .warm_up_time(std::time::Duration::from_secs(1))
}

fn gate_kernel_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("gate_kernels");
    let hadamard = Gate::H.matrix();

    for &num_qubits in &[4usize, 6, 8] {
        group.throughput(Throughput::Elements(1u64 << num_qubits));
        for kernel in [Kernel::Strided, Kernel::Dense] {
            group.bench_function(format!("hadamard_{:?}_{}_qubits", kernel, num_qubits), |b| {
                b.iter(|| {
                    let mut state = QuantumState::new(num_qubits);
                    operator::apply_single_qubit_gate(
                        black_box(&mut state),
                        black_box(&hadamard),
                        black_box(num_qubits / 2),
                        kernel,
                    )
                });
            });

            group.bench_function(format!("cx_{:?}_{}_qubits", kernel, num_qubits), |b| {
                b.iter(|| {
                    let mut state = QuantumState::new(num_qubits);
                    operator::apply_cx(black_box(&mut state), black_box(0), black_box(1), kernel)
                });
            });
        }
    }

    group.finish();
}

fn operator_construction_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("operator_lift");
    let cx = CxVariant::TargetAbove.matrix();
    for &num_qubits in &[4usize, 6, 8] {
        group.bench_function(format!("lift_adjacent_{}_qubits", num_qubits), |b| {
            b.iter(|| operator::lift_adjacent(black_box(&cx), black_box(0), black_box(num_qubits)));
        });
    }
    group.finish();
}

fn program_benchmarks(c: &mut Criterion) {
    // ghz preparation on 12 qubits followed by a round of measurements
    let mut program = String::from("Q[12]\nH[0]\n");
    for q in 0..11 {
        program.push_str(&format!("CX[{},{}]\n", q, q + 1));
    }
    for q in 0..12 {
        program.push_str(&format!("MZ[{}]\n", q));
    }

    c.bench_function("ghz_12_program", |b| {
        b.iter(|| {
            let mut session = Session::new(SimConfig {
                seed: Some(1),
                ..SimConfig::default()
            });
            session.run_source(black_box(&program), |_, _| {})
        });
    });
}

criterion_group! {
    name = benches;
    config = custom_criterion_config();
    targets = gate_kernel_benchmarks, operator_construction_benchmarks, program_benchmarks
}
criterion_main!(benches);
