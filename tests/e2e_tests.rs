//! End-to-end tests for the benchmark driver
//!
//! These run complete benchmarks through the public library API, with real
//! concurrent workers, and check the figures the report is built from.

use rdma_latency_sim::{
    app::App,
    executor::{create_executor_for_mode, run_benchmark, AnalyticExecutor, BenchmarkExecutor},
    types::TimingMode,
    AppError, Config, Transport, TransportRegistry,
};
use std::sync::Arc;
use std::time::Instant;

fn registry() -> Arc<TransportRegistry> {
    Arc::new(TransportRegistry::standard())
}

/// 6.4 GB over PCIe Gen5 models roughly 100ms per transfer
const SCALING_PAYLOAD_GB: f64 = 6.4;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_wall_clock_throughput_scales_with_world_size() {
    let single = run_benchmark("pcie_gen5", 1, SCALING_PAYLOAD_GB).await.unwrap();
    let eight = run_benchmark("pcie_gen5", 8, SCALING_PAYLOAD_GB).await.unwrap();

    let ratio = eight.aggregate_throughput_gbps / single.aggregate_throughput_gbps;
    assert!(
        (5.0..=9.0).contains(&ratio),
        "expected near-linear scaling, got ratio {:.2}",
        ratio
    );

    // Latency does not depend on how many workers share the run
    assert!((eight.mean_latency_microseconds - single.mean_latency_microseconds).abs() < 1e-6);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_workers_run_concurrently() {
    let start = Instant::now();
    let summary = run_benchmark("pcie_gen5", 16, SCALING_PAYLOAD_GB).await.unwrap();
    let wall = start.elapsed().as_secs_f64();

    assert_eq!(summary.workers.len(), 16);
    // Sixteen sequential transfers would take 1.6s
    assert!(wall < 0.8, "fan-out took {:.3}s", wall);
    assert!(summary.elapsed_seconds >= 0.1);
}

#[tokio::test]
async fn test_analytic_throughput_is_exactly_linear() {
    let executor = AnalyticExecutor::new(registry());

    for transport in Transport::ALL {
        let one = executor.run_benchmark(transport.as_str(), 1, 1.0).await.unwrap();
        let many = executor.run_benchmark(transport.as_str(), 32, 1.0).await.unwrap();

        let ratio = many.aggregate_throughput_gbps / one.aggregate_throughput_gbps;
        assert!((ratio - 32.0).abs() < 1e-9, "{}: ratio {}", transport, ratio);
    }
}

#[tokio::test]
async fn test_modes_agree_on_latency() {
    let wall = create_executor_for_mode(registry(), TimingMode::WallClock);
    let analytic = create_executor_for_mode(registry(), TimingMode::Analytic);

    let a = wall.run_benchmark("gpudirect_rdma", 4, 0.5).await.unwrap();
    let b = analytic.run_benchmark("gpudirect_rdma", 4, 0.5).await.unwrap();

    assert_eq!(a.timing_mode, TimingMode::WallClock);
    assert_eq!(b.timing_mode, TimingMode::Analytic);
    assert!((a.mean_latency_microseconds - b.mean_latency_microseconds).abs() < 1e-9);
    // Measured span is never shorter than the modeled one
    assert!(a.elapsed_seconds >= b.elapsed_seconds);
}

#[tokio::test]
async fn test_reference_nvlink_run() {
    let summary = run_benchmark("nvlink4", 1, 1.0).await.unwrap();

    assert!((summary.mean_latency_microseconds - 1111.161).abs() < 0.01);
    let expected = 2.0 / summary.elapsed_seconds;
    assert!((summary.aggregate_throughput_gbps - expected).abs() < 1e-9);
}

#[tokio::test]
async fn test_invalid_inputs() {
    assert!(matches!(
        run_benchmark("usb4", 8, 1.0).await.unwrap_err(),
        AppError::UnknownTransport(_)
    ));
    assert!(matches!(
        run_benchmark("nvlink4", 8, 0.0).await.unwrap_err(),
        AppError::InvalidPayload(_)
    ));
    assert!(matches!(
        run_benchmark("nvlink4", 8, -2.0).await.unwrap_err(),
        AppError::InvalidPayload(_)
    ));
    assert!(matches!(
        run_benchmark("nvlink4", 0, 1.0).await.unwrap_err(),
        AppError::Driver(_)
    ));
}

#[tokio::test]
async fn test_payload_beyond_timer_range() {
    // 1e25 GB is a valid payload, but its modeled time cannot be slept for
    assert!(matches!(
        run_benchmark("pcie_gen5", 1, 1e25).await.unwrap_err(),
        AppError::Driver(_)
    ));

    let summary = AnalyticExecutor::new(registry())
        .run_benchmark("pcie_gen5", 1, 1e25)
        .await
        .unwrap();
    assert!((summary.elapsed_seconds - 1.5625e23).abs() / 1.5625e23 < 1e-9);
}

#[tokio::test]
async fn test_app_report_end_to_end() {
    let config = Config {
        world_size: 2,
        payload_gb: 1.0,
        timing_mode: TimingMode::Analytic,
        enable_color: false,
        ..Default::default()
    };
    let app = App::new(config);
    let summaries = app.run().await.unwrap();
    let report = app.render(&summaries).unwrap();

    let expected = [
        "RDMA Sim: 2 GPUs, 1.0GB payload",
        "pcie_gen5: 15626us latency, 256.0 GB/s TP",
        "nvlink4: 1111us latency, 3599.8 GB/s TP",
        "ib_nic: 2501us latency, 1599.4 GB/s TP",
        "gpudirect_rdma: 2500us latency, 1599.9 GB/s TP",
    ];
    assert_eq!(report.lines().collect::<Vec<_>>(), expected);
}
