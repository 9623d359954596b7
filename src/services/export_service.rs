use crate::dto::application_dto::ApplicantView;
use crate::error::Result;
use crate::models::application::MatchBand;
use rust_xlsxwriter::*;

pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

pub struct ExportService;

impl ExportService {
    /// Styled workbook of applicants, one row each, in the order given.
    pub fn generate_applicants_xlsx(applicants: &[ApplicantView]) -> Result<Vec<u8>> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name("Applicants")?;

        let primary_color = Color::RGB(0x1E293B);
        let header_bg = Color::RGB(0x0F172A);
        let header_text = Color::White;
        let alt_row_1 = Color::RGB(0xF8FAFC);
        let alt_row_2 = Color::White;
        let border_color = Color::RGB(0xE2E8F0);

        let band_high = Color::RGB(0x10B981);
        let band_medium = Color::RGB(0xF59E0B);
        let band_low = Color::RGB(0xEF4444);
        let band_unknown = Color::RGB(0x94A3B8);

        let columns = [
            ("#", 6.0),
            ("Name", 28.0),
            ("Job Title", 24.0),
            ("Email", 30.0),
            ("Phone", 16.0),
            ("Graduation", 12.0),
            ("Gender", 10.0),
            ("Experience", 40.0),
            ("Skills", 40.0),
            ("Location", 20.0),
            ("Pincode", 10.0),
            ("Status", 16.0),
            ("Match", 10.0),
            ("Applied On", 22.0),
            ("Resume", 40.0),
        ];
        let last_col = (columns.len() - 1) as u16;

        for (i, (_, width)) in columns.iter().enumerate() {
            worksheet.set_column_width(i as u16, *width)?;
        }

        let title_format = Format::new()
            .set_font_size(16)
            .set_bold()
            .set_font_color(header_text)
            .set_background_color(primary_color)
            .set_align(FormatAlign::CenterAcross)
            .set_align(FormatAlign::VerticalCenter);
        worksheet.set_row_height(0, 40)?;
        worksheet.merge_range(0, 0, 0, last_col, "Applicants Report", &title_format)?;

        let subtitle_format = Format::new()
            .set_font_size(10)
            .set_italic()
            .set_font_color(Color::RGB(0x94A3B8))
            .set_background_color(primary_color)
            .set_align(FormatAlign::CenterAcross)
            .set_align(FormatAlign::VerticalCenter);
        worksheet.set_row_height(1, 22)?;
        let exported_at = chrono::Utc::now().format("%d.%m.%Y %H:%M UTC").to_string();
        let subtitle = format!(
            "Exported: {}  •  Applicants: {}",
            exported_at,
            applicants.len()
        );
        worksheet.merge_range(1, 0, 1, last_col, &subtitle, &subtitle_format)?;

        let header_format = Format::new()
            .set_bold()
            .set_font_size(10)
            .set_font_color(header_text)
            .set_background_color(header_bg)
            .set_align(FormatAlign::Center)
            .set_align(FormatAlign::VerticalCenter)
            .set_text_wrap()
            .set_border(FormatBorder::Thin)
            .set_border_color(border_color);
        let header_row = 2;
        worksheet.set_row_height(header_row, 30)?;
        for (i, (name, _)) in columns.iter().enumerate() {
            worksheet.write_string_with_format(header_row, i as u16, *name, &header_format)?;
        }

        let data_start_row = 3;
        for (idx, applicant) in applicants.iter().enumerate() {
            let row = data_start_row + idx as u32;
            let bg = if idx % 2 == 0 { alt_row_1 } else { alt_row_2 };

            let base_fmt = Format::new()
                .set_font_size(10)
                .set_background_color(bg)
                .set_align(FormatAlign::VerticalCenter)
                .set_border(FormatBorder::Thin)
                .set_border_color(border_color);
            let center_fmt = base_fmt.clone().set_align(FormatAlign::Center);
            let wrap_fmt = base_fmt.clone().set_text_wrap();

            worksheet.set_row_height(row, 22)?;
            worksheet.write_number_with_format(row, 0, (idx + 1) as f64, &center_fmt)?;
            worksheet.write_string_with_format(
                row,
                1,
                &applicant.full_name,
                &base_fmt.clone().set_bold(),
            )?;

            let text_cells = [
                (2, &applicant.job_title, &base_fmt),
                (3, &applicant.email, &base_fmt),
                (4, &applicant.phone_number, &center_fmt),
                (5, &applicant.year_of_graduation, &center_fmt),
                (6, &applicant.gender, &center_fmt),
                (7, &applicant.experience, &wrap_fmt),
                (8, &applicant.skills, &wrap_fmt),
                (9, &applicant.location, &base_fmt),
                (10, &applicant.pincode, &center_fmt),
                (11, &applicant.status, &center_fmt),
            ];
            for (col, value, fmt) in text_cells {
                worksheet.write_string_with_format(row, col, value.as_str(), fmt)?;
            }

            let band_color = match applicant.match_band {
                MatchBand::High => band_high,
                MatchBand::Medium => band_medium,
                MatchBand::Low => band_low,
                MatchBand::Unknown => band_unknown,
            };
            let match_fmt = center_fmt.clone().set_bold().set_font_color(band_color);
            match applicant.match_percentage {
                Some(m) => worksheet.write_number_with_format(row, 12, m, &match_fmt)?,
                None => worksheet.write_string_with_format(row, 12, &applicant.match_label, &match_fmt)?,
            };

            worksheet.write_string_with_format(
                row,
                13,
                applicant.applied_on.as_deref().unwrap_or_default(),
                &center_fmt,
            )?;
            worksheet.write_string_with_format(row, 14, &applicant.resume, &wrap_fmt)?;
        }

        worksheet.set_freeze_panes(data_start_row, 2)?;
        if !applicants.is_empty() {
            let last_row = data_start_row + applicants.len() as u32 - 1;
            worksheet.autofilter(header_row, 0, last_row, last_col)?;
        }

        let buffer = workbook.save_to_buffer()?;
        Ok(buffer)
    }

    pub fn export_filename(job_title: Option<&str>) -> String {
        let scope = job_title
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(|t| t.to_lowercase().replace(' ', "_"))
            .unwrap_or_else(|| "all".to_string());
        format!(
            "applicants_{}_{}.xlsx",
            scope,
            chrono::Utc::now().format("%Y%m%d")
        )
    }
}
