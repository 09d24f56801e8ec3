//! # 工况与标准大气模型
//!
//! ISA-1976 标准大气（对流层 + 低平流层）与单算例工况点。
//!
//! ## 依赖关系
//! - 被 `commands/sweep.rs`, `sweep/manifest.rs` 使用

use serde::{Deserialize, Serialize};

const T0: f64 = 288.15; // K
const P0: f64 = 101_325.0; // Pa
const LAPSE: f64 = 0.0065; // K/m
const R_AIR: f64 = 287.052_87; // J/(kg·K)
const G0: f64 = 9.80665; // m/s²
const GAMMA: f64 = 1.4;
const T_TROPOPAUSE: f64 = 216.65; // K
const H_TROPOPAUSE: f64 = 11_000.0; // m
const FT_TO_M: f64 = 0.3048;

/// 给定几何高度处的大气属性
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Atmosphere {
    /// 静压 (Pa)
    pub pressure: f64,
    /// 密度 (kg/m³)
    pub density: f64,
    /// 静温 (K)
    pub temperature: f64,
    /// 声速 (m/s)
    pub speed_of_sound: f64,
    /// 动力粘度 (Pa·s)
    pub dynamic_viscosity: f64,
}

/// ISA-1976 标准大气，适用于 0 – 20 km
pub fn isa_atmosphere(altitude_m: f64) -> Atmosphere {
    let (temperature, pressure) = if altitude_m <= H_TROPOPAUSE {
        let t = T0 - LAPSE * altitude_m;
        let p = P0 * (t / T0).powf(G0 / (LAPSE * R_AIR));
        (t, p)
    } else {
        // 等温层
        let p11 = P0 * (T_TROPOPAUSE / T0).powf(G0 / (LAPSE * R_AIR));
        let p = p11 * (-G0 * (altitude_m - H_TROPOPAUSE) / (R_AIR * T_TROPOPAUSE)).exp();
        (T_TROPOPAUSE, p)
    };

    let density = pressure / (R_AIR * temperature);
    let speed_of_sound = (GAMMA * R_AIR * temperature).sqrt();
    // Sutherland
    let dynamic_viscosity = 1.458e-6 * temperature.powf(1.5) / (temperature + 110.4);

    Atmosphere {
        pressure,
        density,
        temperature,
        speed_of_sound,
        dynamic_viscosity,
    }
}

/// 单算例工况点
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperatingPoint {
    /// 迎角 (deg)
    pub alpha_deg: f64,
    /// 侧滑角 (deg)
    pub sideslip_deg: f64,
    /// 马赫数
    pub mach: f64,
    /// 基于机翼 MAC 的雷诺数
    pub reynolds: f64,
    /// 高度 (ft)
    pub altitude_ft: f64,
    /// 大气属性
    pub atmosphere: Atmosphere,
    /// 来流速度 (m/s)
    pub velocity: f64,
}

impl OperatingPoint {
    /// 由迎角、马赫数、高度与参考长度（机翼 MAC）构造工况点
    pub fn new(alpha_deg: f64, mach: f64, altitude_ft: f64, ref_length_m: f64) -> OperatingPoint {
        let atmosphere = isa_atmosphere(altitude_ft * FT_TO_M);
        let velocity = atmosphere.speed_of_sound * mach;
        let reynolds =
            atmosphere.density * velocity * ref_length_m / atmosphere.dynamic_viscosity;

        OperatingPoint {
            alpha_deg,
            sideslip_deg: 0.0,
            mach,
            reynolds,
            altitude_ft,
            atmosphere,
            velocity,
        }
    }
}
