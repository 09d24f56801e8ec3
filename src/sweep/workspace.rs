//! # 算例工作目录管理
//!
//! 创建每算例目录，向算例目录与求解器暂存目录复制几何/数据文件，
//! 并在每次暂存前清空暂存目录。
//!
//! ## 不变量
//! - 求解器批处理脚本固定从暂存目录读取输入，调用前暂存目录必须
//!   恰好只包含当前算例的文件，绝不可混入上一算例的残留
//! - 单个算例的 I/O 失败只放弃该算例，不中止整个扫掠
//!
//! ## 依赖关系
//! - 被 `commands/sweep.rs`, `commands/post.rs` 使用
//! - 文件命名约定与求解器宏共享，见各 `*_path` 函数

use crate::error::{CawixError, Result};
use crate::models::Surface;
use crate::sweep::grid::CaseIndex;
use std::fs;
use std::path::{Path, PathBuf};

/// 算例工作目录管理器
pub struct CaseWorkspace {
    /// 算例根目录（永久保存）
    cases_root: PathBuf,
    /// CAD 导出文件来源目录
    geometry_dir: PathBuf,
    /// 求解器暂存目录（共享、每算例清空）
    scratch_dir: PathBuf,
}

impl CaseWorkspace {
    pub fn new(
        cases_root: impl Into<PathBuf>,
        geometry_dir: impl Into<PathBuf>,
        scratch_dir: impl Into<PathBuf>,
    ) -> CaseWorkspace {
        CaseWorkspace {
            cases_root: cases_root.into(),
            geometry_dir: geometry_dir.into(),
            scratch_dir: scratch_dir.into(),
        }
    }

    pub fn scratch_dir(&self) -> &Path {
        &self.scratch_dir
    }

    /// 算例目录：组合算例位于根目录下，单独算例位于 `<S>_ALONE` 下
    pub fn case_dir(&self, alone: Option<Surface>, case: &CaseIndex) -> PathBuf {
        let dir_name = format!("Case_{}", case.id());
        match alone {
            None => self.cases_root.join(dir_name),
            Some(surface) => self
                .cases_root
                .join(format!("{}_ALONE", surface.as_str()))
                .join(dir_name),
        }
    }

    /// 确保算例目录存在
    pub fn prepare_case(&self, alone: Option<Surface>, case: &CaseIndex) -> Result<PathBuf> {
        let dir = self.case_dir(alone, case);
        fs::create_dir_all(&dir).map_err(|e| CawixError::FileWriteError {
            path: dir.display().to_string(),
            source: e,
        })?;
        Ok(dir)
    }

    /// 清空暂存目录的全部内容（文件与子目录）
    pub fn clean_scratch(&self) -> Result<()> {
        fs::create_dir_all(&self.scratch_dir).map_err(|e| CawixError::FileWriteError {
            path: self.scratch_dir.display().to_string(),
            source: e,
        })?;

        let entries = fs::read_dir(&self.scratch_dir).map_err(|e| CawixError::FileReadError {
            path: self.scratch_dir.display().to_string(),
            source: e,
        })?;

        for entry in entries.filter_map(|e| e.ok()) {
            let path = entry.path();
            let removed = if path.is_dir() {
                fs::remove_dir_all(&path)
            } else {
                fs::remove_file(&path)
            };
            removed.map_err(|e| CawixError::FileWriteError {
                path: path.display().to_string(),
                source: e,
            })?;
        }

        Ok(())
    }

    /// 将指定几何文件从来源目录复制到算例目录与暂存目录，覆盖同名文件
    pub fn stage_geometry(&self, file_names: &[String], case_dir: &Path) -> Result<()> {
        for name in file_names {
            let src = self.geometry_dir.join(name);
            if !src.exists() {
                return Err(CawixError::FileNotFound {
                    path: src.display().to_string(),
                });
            }

            for dest_dir in [case_dir, self.scratch_dir.as_path()] {
                let dest = dest_dir.join(name);
                fs::copy(&src, &dest).map_err(|e| CawixError::FileWriteError {
                    path: dest.display().to_string(),
                    source: e,
                })?;
            }
        }
        Ok(())
    }

}

// ─────────────────────────────────────────────────────────────────
// 求解器输出文件命名约定（与求解器宏共享的契约）
// ─────────────────────────────────────────────────────────────────

/// 组合算例的仿真文件名
pub fn combined_sim_name(case: &CaseIndex) -> String {
    format!("CANARD_WING_{}_run.sim", case.id())
}

/// 组合算例的积分系数报告
pub fn combined_report_path(root: &Path, case: &CaseIndex) -> PathBuf {
    root.join(format!("Case_{}", case.id()))
        .join(format!("CANARD_WING_{}_run_report.csv", case.id()))
}

/// 单独算例的积分系数报告
pub fn alone_report_path(root: &Path, surface: Surface, case: &CaseIndex) -> PathBuf {
    root.join(format!("{}_ALONE", surface.as_str()))
        .join(format!("{}_{}_report.csv", surface.as_str(), case.id()))
}

/// 组合算例中某升力面的展向载荷报告
pub fn combined_loads_path(root: &Path, surface: Surface, case: &CaseIndex) -> PathBuf {
    root.join(format!("Case_{}", case.id())).join(format!(
        "CANARD_WING_{}_run_{}_loads.csv",
        case.id(),
        surface.as_str()
    ))
}

/// 单独算例的展向载荷报告
pub fn alone_loads_path(root: &Path, surface: Surface, case: &CaseIndex) -> PathBuf {
    root.join(format!("{}_ALONE", surface.as_str())).join(format!(
        "{}_{}_{}_loads.csv",
        surface.as_str(),
        case.id(),
        surface.as_str()
    ))
}

/// 算例数据清单文件名
pub fn manifest_name(case: &CaseIndex) -> String {
    format!("Data_{}.xml", case.id())
}

/// 扫掠点结果目录 `RESULTS/Case_<point-id>`
pub fn results_dir(root: &Path, point: &CaseIndex) -> PathBuf {
    root.join("RESULTS").join(format!("Case_{}", point.id()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;

    fn temp_root(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("cawix_ws_{}_{}", tag, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_clean_then_stage_leaves_exact_contents() {
        let root = temp_root("stage");
        let geometry = root.join("geometry");
        let scratch = root.join("scratch");
        let cases = root.join("cases");
        fs::create_dir_all(&geometry).unwrap();
        fs::create_dir_all(&scratch).unwrap();

        for name in ["A", "B"] {
            File::create(geometry.join(name))
                .unwrap()
                .write_all(b"solid")
                .unwrap();
        }

        // 暂存目录中的残留文件与子目录
        File::create(scratch.join("stale.step")).unwrap();
        fs::create_dir_all(scratch.join("stale_dir")).unwrap();
        File::create(scratch.join("stale_dir").join("junk")).unwrap();

        let ws = CaseWorkspace::new(&cases, &geometry, &scratch);
        let case = CaseIndex::new(vec![0, 0]);
        let case_dir = ws.prepare_case(None, &case).unwrap();

        ws.clean_scratch().unwrap();
        ws.stage_geometry(&["A".to_string(), "B".to_string()], &case_dir)
            .unwrap();

        let mut scratch_contents: Vec<String> = fs::read_dir(&scratch)
            .unwrap()
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().to_string_lossy().to_string())
            .collect();
        scratch_contents.sort();
        assert_eq!(scratch_contents, vec!["A", "B"]);

        assert!(case_dir.join("A").exists());
        assert!(case_dir.join("B").exists());

        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn test_stage_missing_geometry_fails() {
        let root = temp_root("missing");
        let geometry = root.join("geometry");
        let scratch = root.join("scratch");
        fs::create_dir_all(&geometry).unwrap();
        fs::create_dir_all(&scratch).unwrap();

        let ws = CaseWorkspace::new(root.join("cases"), &geometry, &scratch);
        let case = CaseIndex::new(vec![0]);
        let case_dir = ws.prepare_case(None, &case).unwrap();

        let err = ws
            .stage_geometry(&["NOPE.step".to_string()], &case_dir)
            .unwrap_err();
        assert!(matches!(err, CawixError::FileNotFound { .. }));

        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn test_layout_paths() {
        let case = CaseIndex::new(vec![0, 1, 0, 0, 0, 0, 0, 2]);
        let root = Path::new("/work");

        assert_eq!(
            combined_report_path(root, &case),
            root.join("Case_0_1_0_0_0_0_0_2")
                .join("CANARD_WING_0_1_0_0_0_0_0_2_run_report.csv")
        );
        assert_eq!(
            alone_report_path(root, Surface::Canard, &case),
            root.join("CANARD_ALONE")
                .join("CANARD_0_1_0_0_0_0_0_2_report.csv")
        );
        assert_eq!(
            combined_loads_path(root, Surface::Wing, &case),
            root.join("Case_0_1_0_0_0_0_0_2")
                .join("CANARD_WING_0_1_0_0_0_0_0_2_run_WING_loads.csv")
        );
        assert_eq!(
            alone_loads_path(root, Surface::Wing, &case),
            root.join("WING_ALONE")
                .join("WING_0_1_0_0_0_0_0_2_WING_loads.csv")
        );
        assert_eq!(manifest_name(&case), "Data_0_1_0_0_0_0_0_2.xml");
        let point = CaseIndex::new(vec![0, 1]);
        assert_eq!(results_dir(root, &point), root.join("RESULTS").join("Case_0_1"));
        assert_eq!(combined_sim_name(&case), "CANARD_WING_0_1_0_0_0_0_0_2_run.sim");
    }
}
