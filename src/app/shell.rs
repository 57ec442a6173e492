// ==========================================
// 灌溉排程系统 - 交互式菜单
// ==========================================
// 职责: 菜单分发、输入校验、结果打印
// 红线: 任何 API 错误只打印,不中断会话
// ==========================================

use chrono::{Local, NaiveDate};
use std::io::{self, Write};
use tracing::debug;

use crate::api::ApiError;
use crate::app::input::{
    next_dates, parse_non_negative_f64, parse_optional_filter, parse_positive_week,
};
use crate::app::prompt::Prompter;
use crate::app::state::AppState;
use crate::config::DEFAULT_FORECAST_DAYS;
use crate::engine::RecalcError;
use crate::report::{format_etc_history, format_field_table, format_weather_table};

const BANNER_WIDTH: usize = 50;

// ==========================================
// MenuChoice - 菜单项
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuChoice {
    ViewFields,
    AddField,
    EditField,
    DeleteField,
    EnterWeather,
    ViewEtcTable,
    ViewEtcHistory,
    ViewWeather,
    Exit,
}

impl MenuChoice {
    fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(Self::ViewFields),
            "2" => Some(Self::AddField),
            "3" => Some(Self::EditField),
            "4" => Some(Self::DeleteField),
            "5" => Some(Self::EnterWeather),
            "6" => Some(Self::ViewEtcTable),
            "7" => Some(Self::ViewEtcHistory),
            "8" => Some(Self::ViewWeather),
            "9" => Some(Self::Exit),
            _ => None,
        }
    }
}

// ==========================================
// Shell - 交互式菜单
// ==========================================
pub struct Shell<'a, P: Prompter, W: Write> {
    state: &'a AppState,
    prompter: P,
    out: W,
    forecast_days: u32,
    fixed_today: Option<NaiveDate>,
    input_closed: bool,
}

impl<'a, P: Prompter, W: Write> Shell<'a, P, W> {
    pub fn new(state: &'a AppState, prompter: P, out: W) -> Self {
        Self {
            state,
            prompter,
            out,
            forecast_days: DEFAULT_FORECAST_DAYS,
            fixed_today: None,
            input_closed: false,
        }
    }

    /// 设置预报天数
    pub fn with_forecast_days(mut self, forecast_days: u32) -> Self {
        self.forecast_days = forecast_days.max(1);
        self
    }

    /// 固定"今天" (测试用)
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.fixed_today = Some(today);
        self
    }

    /// 取回输入源与输出 (会话结束后检查)
    pub fn into_parts(self) -> (P, W) {
        (self.prompter, self.out)
    }

    /// 运行菜单循环,直到选择退出或输入结束
    pub fn run(&mut self) -> io::Result<()> {
        writeln!(self.out, "Welcome to the Irrigation Scheduling Application!")?;

        loop {
            self.display_main_menu()?;
            let Some(choice) = self.ask("Select an option (1-9): ") else {
                break;
            };

            match MenuChoice::parse(&choice) {
                Some(MenuChoice::ViewFields) => {
                    self.display_fields()?;
                }
                Some(MenuChoice::AddField) => self.add_field()?,
                Some(MenuChoice::EditField) => self.edit_field()?,
                Some(MenuChoice::DeleteField) => self.delete_field()?,
                Some(MenuChoice::EnterWeather) => self.input_weather_data()?,
                Some(MenuChoice::ViewEtcTable) => self.view_etc_table()?,
                Some(MenuChoice::ViewEtcHistory) => self.view_etc_history()?,
                Some(MenuChoice::ViewWeather) => self.view_weather_data()?,
                Some(MenuChoice::Exit) => {
                    writeln!(
                        self.out,
                        "\nThank you for using the Irrigation Scheduling Application. Goodbye!"
                    )?;
                    return Ok(());
                }
                None => writeln!(self.out, "\nInvalid option. Please select 1-9.")?,
            }

            if self.input_closed {
                break;
            }
        }

        writeln!(self.out, "\nInput closed. Goodbye!")?;
        Ok(())
    }

    // ==========================================
    // 输入辅助
    // ==========================================

    /// 读取一行并去除首尾空白; 输入结束返回 None
    fn ask(&mut self, prompt: &str) -> Option<String> {
        if self.input_closed {
            return None;
        }
        match self.prompter.read_line(prompt) {
            Some(line) => Some(line.trim().to_string()),
            None => {
                self.input_closed = true;
                None
            }
        }
    }

    /// 反复提示直到解析成功; 输入结束返回 None
    fn ask_until<T>(
        &mut self,
        prompt: &str,
        error_message: &str,
        parse: impl Fn(&str) -> Option<T>,
    ) -> io::Result<Option<T>> {
        loop {
            let Some(line) = self.ask(prompt) else {
                return Ok(None);
            };
            match parse(&line) {
                Some(value) => return Ok(Some(value)),
                None => writeln!(self.out, "{}", error_message)?,
            }
        }
    }

    fn forecast_dates(&self) -> Vec<String> {
        let today = self
            .fixed_today
            .unwrap_or_else(|| Local::now().date_naive());
        next_dates(today, self.forecast_days)
    }

    fn print_error(&mut self, err: &ApiError) -> io::Result<()> {
        writeln!(self.out, "Error: {}", err)
    }

    // ==========================================
    // 菜单项
    // ==========================================

    fn display_main_menu(&mut self) -> io::Result<()> {
        writeln!(self.out, "\n{}", "=".repeat(BANNER_WIDTH))?;
        writeln!(self.out, "IRRIGATION SCHEDULING APPLICATION")?;
        writeln!(self.out, "{}", "=".repeat(BANNER_WIDTH))?;
        writeln!(self.out, "\nMain Menu:")?;
        writeln!(self.out, "1. View Fields")?;
        writeln!(self.out, "2. Add Field")?;
        writeln!(self.out, "3. Edit Field")?;
        writeln!(self.out, "4. Delete Field")?;
        writeln!(self.out, "5. Enter Weather Data (ET0)")?;
        writeln!(self.out, "6. View ETc Table")?;
        writeln!(self.out, "7. View ETc History")?;
        writeln!(self.out, "8. View Weather Data")?;
        writeln!(self.out, "9. Exit")?;
        writeln!(self.out)
    }

    /// 打印地块列表; 返回是否存在地块
    fn display_fields(&mut self) -> io::Result<bool> {
        let fields = match self.state.field_api.list_fields() {
            Ok(fields) => fields,
            Err(e) => {
                self.print_error(&e)?;
                return Ok(false);
            }
        };
        if fields.is_empty() {
            writeln!(
                self.out,
                "\nError: No fields provided. Please enter at least one field."
            )?;
            return Ok(false);
        }

        writeln!(self.out, "\n=== Fields ===")?;
        writeln!(self.out, "{}", format_field_table(&fields))?;
        Ok(true)
    }

    fn add_field(&mut self) -> io::Result<()> {
        writeln!(self.out, "\n=== Add Field ===")?;

        let field_name = loop {
            let Some(name) = self.ask("Enter field name: ") else {
                return Ok(());
            };
            if name.is_empty() {
                writeln!(self.out, "Error: Field name cannot be empty.")?;
                continue;
            }
            match self.state.field_api.field_exists(&name) {
                Ok(true) => {
                    writeln!(self.out, "Error: Field '{}' already exists.", name)?;
                }
                Ok(false) => break name,
                Err(e) => return self.print_error(&e),
            }
        };

        let Some(crop_factor) = self.ask_until(
            "Enter crop factor (Kc): ",
            "Error: Crop factor must be a non-negative number.",
            parse_non_negative_f64,
        )?
        else {
            return Ok(());
        };

        let Some(fertilizer_week) = self.ask_until(
            "Enter fertilizer week: ",
            "Error: Fertilizer week must be a positive integer.",
            parse_positive_week,
        )?
        else {
            return Ok(());
        };

        match self
            .state
            .field_api
            .create_field(&field_name, crop_factor, fertilizer_week)
        {
            Ok(_) => writeln!(self.out, "\nSuccessfully added field '{}'.", field_name),
            Err(e) => self.print_error(&e),
        }
    }

    fn edit_field(&mut self) -> io::Result<()> {
        writeln!(self.out, "\n=== Edit Field ===")?;
        if !self.display_fields()? {
            return Ok(());
        }

        let Some(field_name) = self.ask("\nEnter field name to edit: ") else {
            return Ok(());
        };
        let field = match self.state.field_api.get_field(&field_name) {
            Ok(field) => field,
            Err(e) => return self.print_error(&e),
        };

        writeln!(self.out, "\nCurrent values for '{}':", field_name)?;
        writeln!(self.out, "  Crop Factor: {}", field.crop_factor())?;
        writeln!(self.out, "  Fertilizer Week: {}", field.fertilizer_week())?;

        // 空输入保留原值
        let current_crop_factor = field.crop_factor();
        let Some(crop_factor) = self.ask_until(
            "\nEnter new crop factor (press Enter to keep current): ",
            "Error: Crop factor must be a non-negative number.",
            |s| {
                if s.is_empty() {
                    Some(current_crop_factor)
                } else {
                    parse_non_negative_f64(s)
                }
            },
        )?
        else {
            return Ok(());
        };

        let current_week = field.fertilizer_week();
        let Some(fertilizer_week) = self.ask_until(
            "Enter new fertilizer week (press Enter to keep current): ",
            "Error: Fertilizer week must be a positive integer.",
            |s| {
                if s.is_empty() {
                    Some(current_week)
                } else {
                    parse_positive_week(s)
                }
            },
        )?
        else {
            return Ok(());
        };

        match self
            .state
            .field_api
            .update_field(&field_name, crop_factor, fertilizer_week)
        {
            Ok(_) => writeln!(self.out, "\nSuccessfully updated field '{}'.", field_name),
            Err(e) => self.print_error(&e),
        }
    }

    fn delete_field(&mut self) -> io::Result<()> {
        writeln!(self.out, "\n=== Delete Field ===")?;
        if !self.display_fields()? {
            return Ok(());
        }

        let Some(field_name) = self.ask("\nEnter field name to delete: ") else {
            return Ok(());
        };
        match self.state.field_api.field_exists(&field_name) {
            Ok(true) => {}
            Ok(false) => {
                return writeln!(self.out, "Error: Field '{}' not found.", field_name);
            }
            Err(e) => return self.print_error(&e),
        }

        let prompt = format!(
            "Are you sure you want to delete '{}'? (yes/no): ",
            field_name
        );
        let Some(confirm) = self.ask(&prompt) else {
            return Ok(());
        };
        if !confirm.eq_ignore_ascii_case("yes") {
            return writeln!(self.out, "Deletion cancelled.");
        }

        match self.state.field_api.delete_field(&field_name) {
            Ok(()) => writeln!(self.out, "\nSuccessfully deleted field '{}'.", field_name),
            Err(e) => self.print_error(&e),
        }
    }

    fn input_weather_data(&mut self) -> io::Result<()> {
        let dates = self.forecast_dates();

        writeln!(self.out, "\n=== Enter Weather Data ===")?;
        writeln!(
            self.out,
            "Please enter ET0 (reference evapotranspiration) values for each date."
        )?;
        writeln!(self.out, "Date format: ISO 8601 (YYYY-MM-DD)\n")?;

        for date in &dates {
            let prompt = format!("Enter ET0 for {} (mm/day): ", date);
            let error_message = format!(
                "Error: Invalid ET0 value for {}. Please enter a non-negative number.",
                date
            );
            let Some(et0) = self.ask_until(&prompt, &error_message, parse_non_negative_f64)? else {
                return Ok(());
            };
            if let Err(e) = self.state.weather_api.save_observation(date, et0) {
                return self.print_error(&e);
            }
        }

        // 录入后立即重算; 失败时静默,查看表格时会再次计算
        match self.state.etc_api.calculate_and_save(&dates) {
            Ok(_) => writeln!(self.out, "\nETc values have been calculated and saved."),
            Err(e) => {
                debug!(error = %e, "录入 ET0 后的 ETc 重算未完成");
                Ok(())
            }
        }
    }

    /// 依次检查地块、观测、作物系数,任一不满足则逐项报告且不计算
    fn view_etc_table(&mut self) -> io::Result<()> {
        let dates = self.forecast_dates();

        let fields = match self.state.field_api.list_fields() {
            Ok(fields) => fields,
            Err(e) => return self.print_error(&e),
        };
        if fields.is_empty() {
            return self.report_recalc_error(&RecalcError::NoFields);
        }

        let observations = match self.state.weather_api.get_observations(&dates) {
            Ok(observations) => observations,
            Err(e) => return self.print_error(&e),
        };
        let missing: Vec<String> = dates
            .iter()
            .filter(|date| !observations.iter().any(|o| o.date() == date.as_str()))
            .cloned()
            .collect();
        if !missing.is_empty() {
            return self.report_recalc_error(&RecalcError::MissingObservations { dates: missing });
        }

        let rejected: Vec<String> = fields
            .iter()
            .filter(|f| !f.has_valid_crop_factor())
            .map(|f| f.field_name().to_string())
            .collect();
        if !rejected.is_empty() {
            return self.report_recalc_error(&RecalcError::NoValidFields { rejected });
        }

        let view = match self.state.etc_api.calculate_table(&dates) {
            Ok(view) => view,
            Err(ApiError::Recalc(err)) => return self.report_recalc_error(&err),
            Err(e) => return self.print_error(&e),
        };

        writeln!(self.out, "\n=== ETc Table ===")?;
        writeln!(self.out, "\nDate format: ISO 8601 (YYYY-MM-DD)\n")?;
        writeln!(self.out, "{}", view.table)
    }

    /// 逐项报告数据缺口
    fn report_recalc_error(&mut self, err: &RecalcError) -> io::Result<()> {
        match err {
            RecalcError::NoFields => writeln!(
                self.out,
                "\nError: No fields provided. Please enter at least one field."
            ),
            RecalcError::MissingObservations { dates } => {
                for date in dates {
                    writeln!(
                        self.out,
                        "Error: Missing ET0 value for {}. Please enter a value.",
                        date
                    )?;
                }
                Ok(())
            }
            RecalcError::NoValidFields { rejected } => {
                for field_name in rejected {
                    writeln!(
                        self.out,
                        "Error: Crop factor for '{}' is invalid. Please enter a float value.",
                        field_name
                    )?;
                }
                Ok(())
            }
            RecalcError::NoDates | RecalcError::Storage => {
                writeln!(self.out, "Error: Could not calculate ETc values.")
            }
        }
    }

    fn view_etc_history(&mut self) -> io::Result<()> {
        writeln!(self.out, "\n=== ETc History ===")?;

        let Some(field_filter) = self.ask("Filter by field name (press Enter for all): ") else {
            return Ok(());
        };
        let Some(date_filter) = self.ask("Filter by date YYYY-MM-DD (press Enter for all): ")
        else {
            return Ok(());
        };
        let field_filter = parse_optional_filter(&field_filter);
        let date_filter = parse_optional_filter(&date_filter);

        match self
            .state
            .etc_api
            .history(field_filter.as_deref(), date_filter.as_deref())
        {
            Ok(records) => writeln!(self.out, "{}", format_etc_history(&records)),
            Err(e) => self.print_error(&e),
        }
    }

    fn view_weather_data(&mut self) -> io::Result<()> {
        writeln!(self.out, "\n=== Weather Data ===")?;
        match self.state.weather_api.list_observations() {
            Ok(observations) => writeln!(self.out, "{}", format_weather_table(&observations)),
            Err(e) => self.print_error(&e),
        }
    }
}
