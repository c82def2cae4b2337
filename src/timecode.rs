//! # TTML 时间码编解码
//!
//! 读取时支持两种写法：
//! - `hh:mm:ss.mmm`：时钟时间，小数部分为 1 到 3 位毫秒。
//! - `hh:mm:ss:fff`：时钟时间加帧偏移，帧数需要结合文档的 `ttp:frameRate` 换算。
//!
//! 写入时只输出 `hh:mm:ss.mmm`。
//!
//! 帧率在整份文档解析完之后才能确定，所以解析分两步：
//! [`Timecode`] 只保存基准时间和帧数，[`Timecode::resolve`] 再绑定帧率，
//! 得到不可变的 [`ResolvedTimecode`]。

use std::{fmt, str::FromStr, time::Duration};

use crate::error::TimecodeError;

const NANOS_PER_SECOND: u128 = 1_000_000_000;
const NANOS_PER_MILLI: u128 = 1_000_000;

/// 尚未绑定帧率的时间码。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Timecode {
    base: Duration,
    frames: u64,
}

impl Timecode {
    /// 用普通时长构造时间码，不带帧偏移。写入路径使用。
    #[must_use]
    pub const fn from_duration(base: Duration) -> Self {
        Self { base, frames: 0 }
    }

    /// 时钟时间部分。
    #[must_use]
    pub const fn base(&self) -> Duration {
        self.base
    }

    /// 帧偏移，`hh:mm:ss.mmm` 形式恒为 0。
    #[must_use]
    pub const fn frames(&self) -> u64 {
        self.frames
    }

    /// 绑定文档帧率，得到最终的时间码。
    ///
    /// 帧率缺失或为 0 时帧偏移不参与计算。
    #[must_use]
    pub const fn resolve(self, frame_rate: Option<u32>) -> ResolvedTimecode {
        ResolvedTimecode {
            timecode: self,
            frame_rate,
        }
    }
}

impl From<Duration> for Timecode {
    fn from(base: Duration) -> Self {
        Self::from_duration(base)
    }
}

impl FromStr for Timecode {
    type Err = TimecodeError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        if let Some((clock, frames_str)) = split_frame_suffix(input) {
            let frames = frames_str
                .parse::<u64>()
                .map_err(|source| TimecodeError::InvalidFrames {
                    input: input.to_owned(),
                    value: frames_str.to_owned(),
                    source,
                })?;
            let base = parse_clock_time(clock, "000", input)?;
            return Ok(Self { base, frames });
        }

        let (clock, fraction) = input
            .split_once('.')
            .ok_or_else(|| TimecodeError::InvalidShape {
                input: input.to_owned(),
                reason: "缺少毫秒部分",
            })?;
        let base = parse_clock_time(clock, fraction, input)?;
        Ok(Self { base, frames: 0 })
    }
}

/// 已绑定帧率的时间码。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResolvedTimecode {
    timecode: Timecode,
    frame_rate: Option<u32>,
}

impl ResolvedTimecode {
    /// 解析前的时间码。
    #[must_use]
    pub const fn timecode(&self) -> Timecode {
        self.timecode
    }

    /// 绑定的帧率（帧/秒）。
    #[must_use]
    pub const fn frame_rate(&self) -> Option<u32> {
        self.frame_rate
    }

    /// 帧偏移是否因为帧率缺失而被忽略。
    #[must_use]
    pub const fn frames_ignored(&self) -> bool {
        self.timecode.frames > 0 && !matches!(self.frame_rate, Some(rate) if rate > 0)
    }

    /// 实际时长：`base + frames / frame_rate` 秒，帧率不可用时为 `base`。
    #[must_use]
    pub fn duration(&self) -> Duration {
        match self.frame_rate {
            Some(rate) if rate > 0 => self
                .timecode
                .base
                .saturating_add(frames_to_duration(self.timecode.frames, rate)),
            _ => self.timecode.base,
        }
    }
}

impl fmt::Display for ResolvedTimecode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_clock_time(self.duration()))
    }
}

/// 把时长格式化为 `hh:mm:ss.mmm`。
///
/// 先四舍五入到毫秒再拆分字段；小时至少两位，不设上限。
#[must_use]
pub fn format_clock_time(duration: Duration) -> String {
    let total_ms = (duration.as_nanos() + NANOS_PER_MILLI / 2) / NANOS_PER_MILLI;
    let hours = total_ms / 3_600_000;
    let minutes = (total_ms % 3_600_000) / 60_000;
    let seconds = (total_ms % 60_000) / 1000;
    let millis = total_ms % 1000;

    format!("{hours:02}:{minutes:02}:{seconds:02}.{millis:03}")
}

/// 帧数换算为时长，四舍五入到纳秒。
fn frames_to_duration(frames: u64, frame_rate: u32) -> Duration {
    let rate = u128::from(frame_rate);
    let nanos = (u128::from(frames) * NANOS_PER_SECOND + rate / 2) / rate;
    // 秒数不超过 frames，一定能放进 u64
    let secs = u64::try_from(nanos / NANOS_PER_SECOND).unwrap_or(u64::MAX);
    let subsec = u32::try_from(nanos % NANOS_PER_SECOND).unwrap_or_default();
    Duration::new(secs, subsec)
}

/// 识别末尾的 `:<数字>` 帧数后缀，返回 (时钟部分, 帧数部分)。
fn split_frame_suffix(input: &str) -> Option<(&str, &str)> {
    let (clock, frames) = input.rsplit_once(':')?;
    (!frames.is_empty() && frames.bytes().all(|b| b.is_ascii_digit())).then_some((clock, frames))
}

/// 解析 `hh:mm:ss` 加小数部分。
fn parse_clock_time(clock: &str, fraction: &str, input: &str) -> Result<Duration, TimecodeError> {
    let mut parts = clock.split(':');
    let (Some(hours_str), Some(minutes_str), Some(seconds_str), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(TimecodeError::InvalidShape {
            input: input.to_owned(),
            reason: "应为 hh:mm:ss 三段",
        });
    };

    let hours = parse_field(hours_str, "小时", input)?;
    let minutes = parse_field(minutes_str, "分钟", input)?;
    let seconds = parse_field(seconds_str, "秒", input)?;

    if fraction.is_empty() || fraction.len() > 3 {
        return Err(invalid_field("毫秒", fraction, input));
    }
    let millis = parse_field(fraction, "毫秒", input)?
        * 10u64.pow(3 - u32::try_from(fraction.len()).unwrap_or(3));

    // 分钟和秒不限制在 60 以内，直接按进位累加
    let minute_seconds = minutes
        .checked_mul(60)
        .and_then(|m| m.checked_add(seconds))
        .ok_or_else(|| invalid_field("分钟", minutes_str, input))?;
    let total_seconds = hours
        .checked_mul(3600)
        .and_then(|h| h.checked_add(minute_seconds))
        .ok_or_else(|| invalid_field("小时", hours_str, input))?;

    Ok(Duration::from_secs(total_seconds) + Duration::from_millis(millis))
}

/// 解析一个纯数字字段；符号、空白和空串都视为无效。
fn parse_field(value: &str, field: &'static str, input: &str) -> Result<u64, TimecodeError> {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid_field(field, value, input));
    }
    value
        .parse::<u64>()
        .map_err(|_| invalid_field(field, value, input))
}

fn invalid_field(field: &'static str, value: &str, input: &str) -> TimecodeError {
    TimecodeError::InvalidField {
        input: input.to_owned(),
        field,
        value: value.to_owned(),
    }
}
