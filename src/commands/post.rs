//! # post 命令实现
//!
//! 按扫掠点（迎角之外的全部轴组合）聚合求解器报告：可选地重新
//! 运行报告提取宏，解析四种配置的系数与展向载荷，计算升力线
//! 斜率与下洗/上洗，写出三个结果 CSV。
//!
//! ## 功能
//! - 单个扫掠点失败只放弃该点，后处理继续
//! - 解码失败的报告表头带标签告警，不中止解析
//! - `--skip-macro` 直接解析既有报告文件
//!
//! ## 依赖关系
//! - 使用 `cli/post.rs` 定义的参数
//! - 使用 `sweep/`, `parsers/`, `analysis/`, `report/`
//! - 使用 `utils/output.rs`, `utils/progress.rs`

use crate::analysis::SweepPointData;
use crate::cli::post::PostArgs;
use crate::commands::build_grid;
use crate::error::{CawixError, Result};
use crate::models::Surface;
use crate::parsers::{parse_coefficient_file, parse_loads_file};
use crate::report::{write_downwash, write_resume, write_upwash};
use crate::sweep::workspace::{
    alone_loads_path, alone_report_path, combined_loads_path, combined_report_path,
    combined_sim_name, results_dir,
};
use crate::sweep::{CaseIndex, SolverRunner};
use crate::utils::{output, progress};

use regex::Regex;
use std::fs;
use std::path::Path;
use tabled::{Table, Tabled};
use walkdir::WalkDir;

/// 扫掠点状态行
#[derive(Debug, Clone, Tabled)]
struct PointStatus {
    #[tabled(rename = "Sweep point")]
    point: String,
    #[tabled(rename = "Status")]
    status: String,
}

/// 执行 post 命令
pub fn execute(args: PostArgs) -> Result<()> {
    output::print_header("Post-Processing Sweep Results");

    if !args.cases_root.exists() {
        return Err(CawixError::DirectoryNotFound {
            path: args.cases_root.display().to_string(),
        });
    }

    let grid = build_grid(&args.axes)?;
    // 迎角轴在点内聚合，扫掠点网格由其余轴构成
    let points = grid.leading()?;
    let n_alphas = args.axes.alpha.len();

    output::print_info(&format!(
        "Found {} case directories under '{}'",
        count_case_dirs(&args.cases_root)?,
        args.cases_root.display()
    ));
    output::print_info(&format!(
        "{} sweep points, {} angles of attack each",
        points.len(),
        n_alphas
    ));

    let runner = SolverRunner::new(
        &args.solver_exe,
        &args.solver_options,
        &args.macro_dir,
        &args.macro_name,
    )
    .with_timeout(args.timeout);

    let pb = progress::create_progress_bar(points.len() as u64, "Aggregating");
    let mut statuses: Vec<PointStatus> = Vec::new();

    for point in points.enumerate() {
        pb.suspend(|| output::print_case("aggregating", &point.id()));

        let status = match process_point(&args, &runner, &point, n_alphas) {
            Ok(outcome) => {
                for (case_id, code) in &outcome.macro_failures {
                    pb.suspend(|| {
                        output::print_warning(&format!(
                            "Case {}: extraction macro exited with code {}",
                            case_id, code
                        ));
                    });
                }
                for header in &outcome.skipped {
                    pb.suspend(|| {
                        output::print_warning(&format!(
                            "Point {}: skipped unrecognized header '{}'",
                            point.id(),
                            header
                        ));
                    });
                }
                pb.suspend(|| {
                    output::print_success(&format!(
                        "Point {}: results written to '{}'",
                        point.id(),
                        results_dir(&args.cases_root, &point).display()
                    ));
                });
                if outcome.macro_failures.is_empty() {
                    "ok".to_string()
                } else {
                    format!("macro exit {}", outcome.macro_failures[0].1)
                }
            }
            Err(e) => {
                pb.suspend(|| {
                    output::print_warning(&format!("Point {} abandoned: {}", point.id(), e));
                });
                format!("failed: {}", e)
            }
        };

        statuses.push(PointStatus {
            point: point.id(),
            status,
        });
        pb.inc(1);
    }

    pb.finish_and_clear();

    summarize(&statuses, &args.cases_root.join("post_status.csv"))?;
    Ok(())
}

/// 单个扫掠点的处理结果
struct PointOutcome {
    /// 被跳过的报告表头
    skipped: Vec<String>,
    /// 提取宏非零退出的算例（算例 id, 退出码）
    macro_failures: Vec<(String, i32)>,
}

/// 处理单个扫掠点
fn process_point(
    args: &PostArgs,
    runner: &SolverRunner,
    point: &CaseIndex,
    n_alphas: usize,
) -> Result<PointOutcome> {
    let macro_failures = if args.skip_macro {
        Vec::new()
    } else {
        run_extraction(runner, &args.cases_root, point, n_alphas)?
    };

    let (data, skipped) = collect_sweep_point(&args.cases_root, point, n_alphas)?;
    let report = data.analyze()?;

    let out_dir = results_dir(&args.cases_root, point);
    fs::create_dir_all(&out_dir).map_err(|e| CawixError::FileWriteError {
        path: out_dir.display().to_string(),
        source: e,
    })?;

    let id = point.id();
    write_resume(&data, &out_dir.join(format!("CANARD_WING_{}_resume.csv", id)))?;
    write_downwash(
        &data,
        &report,
        &out_dir.join(format!("CANARD_WING_{}_Downwash.csv", id)),
    )?;
    write_upwash(
        &data,
        &report,
        &out_dir.join(format!("CANARD_WING_{}_Upwash.csv", id)),
    )?;

    Ok(PointOutcome {
        skipped,
        macro_failures,
    })
}

/// 对扫掠点各迎角算例运行报告提取宏
///
/// 非零退出码不中止该点，记录后由调用方在状态表中呈现。
fn run_extraction(
    runner: &SolverRunner,
    cases_root: &Path,
    point: &CaseIndex,
    n_alphas: usize,
) -> Result<Vec<(String, i32)>> {
    let mut failures = Vec::new();
    for a in 0..n_alphas {
        let case = point.with_component(a);
        let case_dir = cases_root.join(format!("Case_{}", case.id()));
        let sim = case_dir.join(combined_sim_name(&case));
        let log = case_dir.join("post.log");
        let outcome = runner.run_sim_batch(&sim.display().to_string(), Some(log.as_path()))?;
        if !outcome.success() {
            failures.push((case.id(), outcome.exit_code));
        }
    }
    Ok(failures)
}

/// 解析一个扫掠点全部迎角下的报告与载荷
///
/// 迎角取自组合报告的 Angle 行；站位几何记录一次，
/// 其余迎角只追加 cl 列并在分析时校验站位数一致。
fn collect_sweep_point(
    root: &Path,
    point: &CaseIndex,
    n_alphas: usize,
) -> Result<(SweepPointData, Vec<String>)> {
    let mut data = SweepPointData::default();
    let mut skipped = Vec::new();

    for a in 0..n_alphas {
        let case = point.with_component(a);

        let combined = parse_coefficient_file(&combined_report_path(root, &case), true)?;
        data.alphas.push(combined.alpha);
        data.coefficients.extend(combined.records);
        skipped.extend(combined.skipped);

        for surface in [Surface::Canard, Surface::Wing] {
            let alone = parse_coefficient_file(&alone_report_path(root, surface, &case), false)?;
            data.coefficients.extend(alone.records);
            skipped.extend(alone.skipped);
        }

        let wing_combined = parse_loads_file(&combined_loads_path(root, Surface::Wing, &case))?;
        let wing_alone = parse_loads_file(&alone_loads_path(root, Surface::Wing, &case))?;
        let canard_combined =
            parse_loads_file(&combined_loads_path(root, Surface::Canard, &case))?;
        let canard_alone = parse_loads_file(&alone_loads_path(root, Surface::Canard, &case))?;

        if a == 0 {
            data.wing_stations = wing_alone.iter().map(|r| r.station()).collect();
            data.canard_stations = canard_alone.iter().map(|r| r.station()).collect();
        }

        data.wing_combined_cl_y
            .push(wing_combined.iter().map(|r| r.cl).collect());
        data.wing_alone_cl_y
            .push(wing_alone.iter().map(|r| r.cl).collect());
        data.canard_combined_cl_y
            .push(canard_combined.iter().map(|r| r.cl).collect());
        data.canard_alone_cl_y
            .push(canard_alone.iter().map(|r| r.cl).collect());
    }

    Ok((data, skipped))
}

/// 统计算例目录（组合与单独构型，不含 RESULTS）
fn count_case_dirs(root: &Path) -> Result<usize> {
    let pattern = Regex::new(r"^Case_\d+(_\d+)*$")
        .map_err(|e| CawixError::Other(format!("case dir pattern: {}", e)))?;

    Ok(WalkDir::new(root)
        .min_depth(1)
        .max_depth(2)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_dir())
        .filter(|e| {
            e.path()
                .parent()
                .and_then(|p| p.file_name())
                .map(|n| n != "RESULTS")
                .unwrap_or(true)
        })
        .filter(|e| pattern.is_match(&e.file_name().to_string_lossy()))
        .count())
}

/// 打印失败点表并写完整状态 CSV
fn summarize(statuses: &[PointStatus], csv_path: &Path) -> Result<()> {
    let failures: Vec<PointStatus> = statuses
        .iter()
        .filter(|s| s.status != "ok")
        .cloned()
        .collect();

    if !failures.is_empty() {
        output::print_header(&format!("{} Sweep Points Failed", failures.len()));
        println!("{}", Table::new(&failures));
    }

    let mut writer = csv::Writer::from_path(csv_path)?;
    writer.write_record(["point", "status"])?;
    for s in statuses {
        writer.write_record([&s.point, &s.status])?;
    }
    writer.flush().map_err(|e| CawixError::FileWriteError {
        path: csv_path.display().to_string(),
        source: e,
    })?;

    output::print_done(&format!(
        "{}/{} sweep points processed, status saved to '{}'",
        statuses.len() - failures.len(),
        statuses.len(),
        csv_path.display()
    ));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use std::path::PathBuf;

    const ALPHAS: [f64; 3] = [-2.0, 0.0, 2.0];

    fn temp_root(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("cawix_post_{}_{}", tag, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn write_file(path: &Path, content: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        File::create(path)
            .unwrap()
            .write_all(content.as_bytes())
            .unwrap();
    }

    /// 线性升力曲线的合成报告树：
    /// CL(W) = 0.08α + 0.2, CL(W+C) = 0.06α + 0.2,
    /// CL(C) = 0.10α + 0.05, CL(C+W) = 0.12α + 0.05
    fn build_synthetic_tree(root: &Path, point: &CaseIndex) {
        for (a, &alpha) in ALPHAS.iter().enumerate() {
            let case = point.with_component(a);

            let combined = format!(
                "Angle of Attack,,,,{alpha}\n\
                 CL_CANARD_WING,,,,{}\n\
                 CL_WING,,,,{}\n\
                 CD_WING,,,,0.01\n\
                 CM_WING,,,,-0.05\n\
                 Iterations,,,,1500\n",
                0.12 * alpha + 0.05,
                0.06 * alpha + 0.2,
            );
            write_file(&combined_report_path(root, &case), &combined);

            let wing_alone = format!(
                "Angle of Attack,,,,{alpha}\nCL_WING,,,,{}\n",
                0.08 * alpha + 0.2
            );
            write_file(&alone_report_path(root, Surface::Wing, &case), &wing_alone);

            let canard_alone = format!(
                "Angle of Attack,,,,{alpha}\nCL_CANARD,,,,{}\n",
                0.10 * alpha + 0.05
            );
            write_file(
                &alone_report_path(root, Surface::Canard, &case),
                &canard_alone,
            );

            let wing_loads = |cl0: f64, cl1: f64| {
                format!(
                    "y,eta,chord,cCl,cl\n3.44,0.25,2.8,{},{}\n10.31,0.75,2.0,{},{}\n",
                    cl0 * 2.8,
                    cl0,
                    cl1 * 2.0,
                    cl1
                )
            };
            write_file(
                &alone_loads_path(root, Surface::Wing, &case),
                &wing_loads(0.07 * alpha, 0.05 * alpha),
            );
            write_file(
                &combined_loads_path(root, Surface::Wing, &case),
                &wing_loads(0.058 * alpha, 0.044 * alpha),
            );

            let canard_loads = |cl: f64| {
                format!("y,eta,chord,cCl,cl\n1.8,0.5,1.1,{},{}\n", cl * 1.1, cl)
            };
            write_file(
                &alone_loads_path(root, Surface::Canard, &case),
                &canard_loads(0.09 * alpha),
            );
            write_file(
                &combined_loads_path(root, Surface::Canard, &case),
                &canard_loads(0.114 * alpha),
            );
        }
    }

    #[test]
    fn test_collect_and_analyze_synthetic_sweep_points() {
        let root = temp_root("collect");

        // 2×2 扫掠点网格（x 与 z 各两档），每点三个迎角
        for xi in 0..2 {
            for zi in 0..2 {
                let point = CaseIndex::new(vec![xi, zi, 0, 0, 0, 0, 0]);
                build_synthetic_tree(&root, &point);

                let (data, skipped) = collect_sweep_point(&root, &point, ALPHAS.len()).unwrap();
                assert!(skipped.is_empty());
                assert_eq!(data.alphas, ALPHAS.to_vec());
                assert_eq!(data.wing_stations.len(), 2);
                assert_eq!(data.canard_stations.len(), 1);

                let report = data.analyze().unwrap();
                assert!((report.cla_wing_alone - 0.08).abs() < 1e-9);
                assert!((report.cla_canard_with_wing - 0.12).abs() < 1e-9);
                assert!((report.downwash_int - 0.25).abs() < 1e-9);
                assert!((report.upwash_int - 0.2).abs() < 1e-9);
                assert!((report.downwash_slope[0] - (-0.012 / 0.06)).abs() < 1e-9);
                assert!((report.upwash_slope[0] - (0.024 / 0.12)).abs() < 1e-9);
            }
        }

        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn test_result_files_are_reproducible() {
        let root = temp_root("repro");
        let point = CaseIndex::new(vec![0, 0, 0, 0, 0, 0, 0]);
        build_synthetic_tree(&root, &point);

        let (data, _) = collect_sweep_point(&root, &point, ALPHAS.len()).unwrap();
        let report = data.analyze().unwrap();

        let out_dir = results_dir(&root, &point);
        fs::create_dir_all(&out_dir).unwrap();
        let resume = out_dir.join("resume.csv");
        let downwash = out_dir.join("Downwash.csv");

        write_resume(&data, &resume).unwrap();
        write_downwash(&data, &report, &downwash).unwrap();
        let first_resume = fs::read(&resume).unwrap();
        let first_downwash = fs::read(&downwash).unwrap();

        write_resume(&data, &resume).unwrap();
        write_downwash(&data, &report, &downwash).unwrap();
        assert_eq!(fs::read(&resume).unwrap(), first_resume);
        assert_eq!(fs::read(&downwash).unwrap(), first_downwash);

        let text = String::from_utf8(first_resume).unwrap();
        assert!(text.starts_with("Aerodynamic Coefficients"));
        // CL 节中迎角 2 的四列：W, W+C, C, C+W
        let expected = format!(
            "2,{},{},{},{}",
            0.08 * 2.0 + 0.2,
            0.06 * 2.0 + 0.2,
            0.10 * 2.0 + 0.05,
            0.12 * 2.0 + 0.05
        );
        assert!(text.contains(&expected));

        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn test_missing_report_abandons_point() {
        let root = temp_root("missing");
        let point = CaseIndex::new(vec![0, 0, 0, 0, 0, 0, 0]);
        build_synthetic_tree(&root, &point);
        fs::remove_file(combined_report_path(
            &root,
            &point.with_component(1),
        ))
        .unwrap();

        let err = collect_sweep_point(&root, &point, ALPHAS.len()).unwrap_err();
        assert!(matches!(err, CawixError::FileReadError { .. }));

        let _ = fs::remove_dir_all(&root);
    }

    #[cfg(unix)]
    #[test]
    fn test_extraction_records_nonzero_macro_exits() {
        let root = temp_root("macroexit");
        let point = CaseIndex::new(vec![0, 0, 0, 0, 0, 0, 0]);
        for a in 0..ALPHAS.len() {
            fs::create_dir_all(root.join(format!("Case_{}", point.with_component(a).id())))
                .unwrap();
        }

        // `false` 忽略参数并以退出码 1 结束，模拟提取宏失败
        let failing = SolverRunner::new("false", "", &root, "Extract.java");
        let failures = run_extraction(&failing, &root, &point, ALPHAS.len()).unwrap();
        assert_eq!(failures.len(), ALPHAS.len());
        assert!(failures.iter().all(|(_, code)| *code == 1));
        assert_eq!(failures[0].0, point.with_component(0).id());

        let passing = SolverRunner::new("true", "", &root, "Extract.java");
        assert!(run_extraction(&passing, &root, &point, ALPHAS.len())
            .unwrap()
            .is_empty());

        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn test_count_case_dirs_skips_results() {
        let root = temp_root("count");
        fs::create_dir_all(root.join("Case_0_0")).unwrap();
        fs::create_dir_all(root.join("Case_0_1")).unwrap();
        fs::create_dir_all(root.join("WING_ALONE").join("Case_0_0")).unwrap();
        fs::create_dir_all(root.join("RESULTS").join("Case_0")).unwrap();
        fs::create_dir_all(root.join("notes")).unwrap();

        assert_eq!(count_case_dirs(&root).unwrap(), 3);

        let _ = fs::remove_dir_all(&root);
    }
}
