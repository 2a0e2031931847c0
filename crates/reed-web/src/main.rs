fn main() {
    reed_web::start();
}
