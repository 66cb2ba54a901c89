use sentinel_core::Config;

use super::CommandResult;

pub fn run(name: &str, phone: &str, emergency_phone: &str, school_id: i64) -> CommandResult {
    let mut config = Config::load()?;
    let client = super::client_from(&config)?;
    let rt = super::runtime()?;

    let student_id = rt.block_on(client.add_student(name, phone, emergency_phone, school_id))?;

    config.backend.student_id = Some(student_id);
    config.backend.school_id = Some(school_id);
    config.save()?;

    println!("Registered student {student_id} at school {school_id}");
    Ok(())
}
