//! # sweep 命令实现
//!
//! 枚举 DOE 算例网格并逐例执行：派生几何快照与工况、准备算例
//! 目录、清空暂存目录、暂存几何、写数据清单、调用求解器。
//!
//! ## 功能
//! - 单个算例失败只放弃该算例，扫掠继续
//! - 求解器非零退出码记入状态表，不判为失败
//! - `--dry-run` 只准备目录与清单，不调用求解器
//!
//! ## 依赖关系
//! - 使用 `cli/sweep.rs` 定义的参数
//! - 使用 `sweep/`, `models/`, `parsers/aircraft.rs`
//! - 使用 `utils/output.rs`, `utils/progress.rs`

use crate::cli::sweep::{Configuration, SweepArgs};
use crate::commands::build_grid;
use crate::error::{CawixError, Result};
use crate::models::{AircraftModel, CanardOffsets, GeometrySnapshot, OperatingPoint, Surface};
use crate::parsers::parse_aircraft_file;
use crate::sweep::manifest::{CaseManifest, SimulationSettings};
use crate::sweep::workspace::manifest_name;
use crate::sweep::{CaseIndex, CaseWorkspace, SolverRunner, SweepGrid};
use crate::utils::{output, progress};

use tabled::{Table, Tabled};

/// 算例状态行
#[derive(Debug, Clone, Tabled)]
struct CaseStatus {
    #[tabled(rename = "Case")]
    case: String,
    #[tabled(rename = "Mach")]
    mach: String,
    #[tabled(rename = "Alpha (deg)")]
    alpha: String,
    #[tabled(rename = "Status")]
    status: String,
}

/// 执行 sweep 命令
pub fn execute(args: SweepArgs) -> Result<()> {
    output::print_header("DOE Interference Sweep");

    if !args.geometry_dir.exists() {
        return Err(CawixError::DirectoryNotFound {
            path: args.geometry_dir.display().to_string(),
        });
    }

    // 基准模型：机翼与鸭翼缺失为致命配置错误，整个批次中止
    let model = parse_aircraft_file(&args.model)?;
    model.require_wing()?;
    model.require_canard()?;
    output::print_info(&format!(
        "Loaded aircraft model with components: {}",
        model.component_names().join(", ")
    ));

    let grid = build_grid(&args.axes)?;
    output::print_info(&format!(
        "Sweep grid: {} axes, {} cases",
        grid.axes().len(),
        grid.len()
    ));

    std::fs::create_dir_all(&args.cases_root).map_err(|e| CawixError::FileWriteError {
        path: args.cases_root.display().to_string(),
        source: e,
    })?;

    let workspace = CaseWorkspace::new(&args.cases_root, &args.geometry_dir, &args.scratch_dir);
    let runner = SolverRunner::new(
        &args.solver_exe,
        &args.solver_options,
        &args.macro_dir,
        &args.macro_name,
    )
    .with_timeout(args.timeout);

    let alone = alone_surface(args.configuration);
    let geometry_files = geometry_files(&model, args.configuration);
    output::print_info(&format!("Staging geometry: {}", geometry_files.join(", ")));
    if args.dry_run {
        output::print_warning("Dry run: solver will not be invoked");
    }

    let pb = progress::create_progress_bar(grid.len() as u64, "Sweeping");
    let mut statuses: Vec<CaseStatus> = Vec::new();

    for case in grid.enumerate() {
        let values = grid.values(&case);
        let status = match run_case(&args, &model, &grid, &workspace, &runner, &geometry_files, alone, &case) {
            Ok(status) => status,
            Err(e) => {
                pb.suspend(|| {
                    output::print_warning(&format!("Case {} abandoned: {}", case.id(), e));
                });
                format!("failed: {}", e)
            }
        };

        statuses.push(CaseStatus {
            case: case.id(),
            mach: format!("{}", values[6]),
            alpha: format!("{}", values[7]),
            status,
        });
        pb.inc(1);
    }

    pb.finish_and_clear();

    summarize(&statuses, &args.cases_root.join("sweep_status.csv"))?;
    Ok(())
}

/// 执行单个算例，返回状态标签
#[allow(clippy::too_many_arguments)]
fn run_case(
    args: &SweepArgs,
    model: &AircraftModel,
    grid: &SweepGrid,
    workspace: &CaseWorkspace,
    runner: &SolverRunner,
    geometry_files: &[String],
    alone: Option<Surface>,
    case: &CaseIndex,
) -> Result<String> {
    let values = grid.values(case);
    let offsets = CanardOffsets {
        x_pos_m: values[0],
        z_pos_m: values[1],
        span_var: values[2],
        sweep_deg: values[3],
        dihedral_deg: values[4],
        rigging_deg: values[5],
    };
    let mach = values[6];
    let alpha = values[7];

    let geometry = GeometrySnapshot::derive(model, &offsets)?;
    let operating = OperatingPoint::new(alpha, mach, args.altitude, geometry.wing.mac);

    let case_dir = workspace.prepare_case(alone, case)?;
    workspace.clean_scratch()?;
    workspace.stage_geometry(geometry_files, &case_dir)?;

    let manifest = CaseManifest {
        operating,
        geometry,
        simulation: SimulationSettings {
            sim_type: args.sim_type.clone(),
            symmetrical: args.symmetrical,
            execute_automesh: args.automesh,
            axis_names: grid.axes().iter().map(|a| a.name().to_string()).collect(),
        },
        case: case.clone(),
    };
    manifest.write(&case_dir.join(manifest_name(case)))?;
    manifest.write(&workspace.scratch_dir().join(manifest_name(case)))?;

    if args.dry_run {
        return Ok("prepared".to_string());
    }

    let log = case_dir.join("solver.log");
    let outcome = runner.run_new_batch(Some(log.as_path()))?;
    if outcome.success() {
        Ok("ok".to_string())
    } else {
        Ok(format!("exit {}", outcome.exit_code))
    }
}

/// 单独构型对应的升力面
fn alone_surface(configuration: Configuration) -> Option<Surface> {
    match configuration {
        Configuration::Combined => None,
        Configuration::CanardAlone => Some(Surface::Canard),
        Configuration::WingAlone => Some(Surface::Wing),
    }
}

/// 本构型需要暂存的 CAD 导出文件名，与 CAD 导出约定共享
fn geometry_files(model: &AircraftModel, configuration: Configuration) -> Vec<String> {
    model
        .component_names()
        .iter()
        .filter(|name| match configuration {
            Configuration::Combined => true,
            Configuration::WingAlone => **name != "CANARD",
            Configuration::CanardAlone => **name != "WING" && **name != "HORIZONTAL",
        })
        .map(|name| format!("{}.step", name))
        .collect()
}

/// 打印失败算例表并写完整状态 CSV
fn summarize(statuses: &[CaseStatus], csv_path: &std::path::Path) -> Result<()> {
    let failures: Vec<CaseStatus> = statuses
        .iter()
        .filter(|s| s.status.starts_with("failed") || s.status.starts_with("exit"))
        .cloned()
        .collect();

    if !failures.is_empty() {
        output::print_header(&format!("{} Cases Need Attention", failures.len()));
        println!("{}", Table::new(&failures));
    }

    let mut writer = csv::Writer::from_path(csv_path)?;
    writer.write_record(["case", "mach", "alpha", "status"])?;
    for s in statuses {
        writer.write_record([&s.case, &s.mach, &s.alpha, &s.status])?;
    }
    writer.flush().map_err(|e| CawixError::FileWriteError {
        path: csv_path.display().to_string(),
        source: e,
    })?;

    output::print_done(&format!(
        "{}/{} cases completed, status saved to '{}'",
        statuses.len() - failures.len(),
        statuses.len(),
        csv_path.display()
    ));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FuselageGeometry, SurfacePlanform};

    fn sample_model() -> AircraftModel {
        AircraftModel {
            fuselage: Some(FuselageGeometry { length: 30.4 }),
            wing: Some(SurfacePlanform::from_planform(
                27.5, 61.0, 0.45, 27.0, 1.5, 2.5, 12.9, -1.2,
            )),
            horizontal: Some(SurfacePlanform::from_planform(
                9.0, 12.0, 0.5, 25.0, 3.0, 0.0, 28.0, 1.1,
            )),
            vertical: None,
            canard: Some(SurfacePlanform::from_planform(
                7.2, 6.5, 0.6, 20.0, 0.0, 1.0, 2.1, 0.4,
            )),
        }
    }

    #[test]
    fn test_geometry_files_per_configuration() {
        let model = sample_model();
        assert_eq!(
            geometry_files(&model, Configuration::Combined),
            vec!["FUSELAGE.step", "WING.step", "HORIZONTAL.step", "CANARD.step"]
        );
        assert_eq!(
            geometry_files(&model, Configuration::WingAlone),
            vec!["FUSELAGE.step", "WING.step", "HORIZONTAL.step"]
        );
        assert_eq!(
            geometry_files(&model, Configuration::CanardAlone),
            vec!["FUSELAGE.step", "CANARD.step"]
        );
    }

    #[test]
    fn test_alone_surface_mapping() {
        assert_eq!(alone_surface(Configuration::Combined), None);
        assert_eq!(
            alone_surface(Configuration::CanardAlone),
            Some(Surface::Canard)
        );
        assert_eq!(alone_surface(Configuration::WingAlone), Some(Surface::Wing));
    }
}
